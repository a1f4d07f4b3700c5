use std::str::FromStr;

use indexmap::IndexMap;
use keebgen_core::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Error, Key, Value};

/// How rotation metadata on anything but the first item of a row is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// Apply it like any other metadata.
    #[default]
    Lenient,
    /// Reject the layout with [`Error::InvalidRotationPlacement`].
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub rotation: RotationPolicy,
}

impl ParseOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            rotation: RotationPolicy::Strict,
        }
    }
}

/// Board-level properties carried by a leading object row (`{"name": ..., "author": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl LayoutMeta {
    fn from_map(map: &IndexMap<String, Value>) -> Self {
        let mut meta = LayoutMeta::default();
        for (k, v) in map {
            match (k.as_str(), v) {
                ("name", Value::String(s)) => meta.name = Some(s.clone()),
                ("author", Value::String(s)) => meta.author = Some(s.clone()),
                ("notes", Value::String(s)) => meta.notes = Some(s.clone()),
                _ => {
                    meta.extra.insert(k.clone(), v.clone());
                }
            }
        }
        meta
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.author.is_none()
            && self.notes.is_none()
            && self.extra.is_empty()
    }
}

/// A layout as a sequence of rows, each row a sequence of labels and metadata objects.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDescription {
    rows: Vec<Value>,
}

impl LayoutDescription {
    /// Wrap a parsed layout tree.
    ///
    /// A root without any row but with labels (`["Q", "W"]`, `[{w: 2}, "Q"]`) is a single-row
    /// board and is read as one row.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let rows = match value {
            Value::Seq(rows) => rows,
            other => {
                return Err(Error::RootNotSequence {
                    found: other.kind(),
                });
            }
        };

        if rows.is_empty() || rows.iter().any(|r| matches!(r, Value::Seq(_))) {
            return Ok(Self { rows });
        }
        if rows.iter().any(|r| matches!(r, Value::String(_))) {
            debug!(items = rows.len(), "reading layout as a single row");
            return Ok(Self {
                rows: vec![Value::Seq(rows)],
            });
        }
        Err(Error::MalformedLayout {
            row: 0,
            item: 0,
            reason: "layout has neither rows nor key labels".to_string(),
        })
    }

    #[must_use]
    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Board metadata from a leading object row, empty when there is none.
    #[must_use]
    pub fn meta(&self) -> LayoutMeta {
        self.rows
            .first()
            .and_then(Value::as_map)
            .map(LayoutMeta::from_map)
            .unwrap_or_default()
    }

    pub fn parse(&self, options: ParseOptions) -> Result<Vec<Key>, Error> {
        parse(self, options)
    }
}

impl FromStr for LayoutDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(Value::from_layout_str(s)?)
    }
}

/// The subset of metadata properties that move or resize keys. Anything else on a metadata
/// object (legends, colors, fonts) is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct KeyProps {
    r: Option<f64>,
    rx: Option<f64>,
    ry: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    w: Option<f64>,
    h: Option<f64>,
    x2: Option<f64>,
    y2: Option<f64>,
    w2: Option<f64>,
    h2: Option<f64>,
}

impl KeyProps {
    fn from_map(props: &IndexMap<String, Value>, row: usize, item: usize) -> Result<Self, Error> {
        let field = |name: &'static str| -> Result<Option<f64>, Error> {
            let Some(v) = props.get(name) else {
                return Ok(None);
            };
            match v.as_f64() {
                Some(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(Error::MalformedLayout {
                    row,
                    item,
                    reason: format!("\"{name}\" must be a finite number, got {}", v.kind()),
                }),
            }
        };

        let out = Self {
            r: field("r")?,
            rx: field("rx")?,
            ry: field("ry")?,
            x: field("x")?,
            y: field("y")?,
            w: field("w")?,
            h: field("h")?,
            x2: field("x2")?,
            y2: field("y2")?,
            w2: field("w2")?,
            h2: field("h2")?,
        };

        // Primary dimensions must be positive; a zero secondary dimension means "as primary".
        for (field, value) in [("w", out.w), ("h", out.h)] {
            if let Some(value) = value.filter(|v| *v <= 0.0) {
                return Err(Error::InvalidDimension {
                    row,
                    item,
                    field,
                    value,
                });
            }
        }
        for (field, value) in [("w2", out.w2), ("h2", out.h2)] {
            if let Some(value) = value.filter(|v| *v < 0.0) {
                return Err(Error::InvalidDimension {
                    row,
                    item,
                    field,
                    value,
                });
            }
        }

        Ok(out)
    }

    fn has_rotation(&self) -> bool {
        self.r.is_some() || self.rx.is_some() || self.ry.is_some()
    }
}

/// Running accumulator of position, size and rotation between emitted keys.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    x2: f64,
    y2: f64,
    width2: f64,
    height2: f64,
    rotation_angle: f64,
    rotation_x: f64,
    rotation_y: f64,
    /// Last rotation pivot seen, to notice when a new cluster starts.
    cluster: Point,
}

impl Cursor {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            x2: 0.0,
            y2: 0.0,
            width2: 1.0,
            height2: 1.0,
            rotation_angle: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            cluster: Point::ORIGIN,
        }
    }

    fn apply(&mut self, props: &KeyProps) {
        // Rotation first, so a new pivot rebases the cursor before this item's offsets land.
        if let Some(r) = props.r {
            self.rotation_angle = r;
        }
        if let Some(rx) = props.rx {
            self.rotation_x = rx;
            self.x = rx;
        }
        if let Some(ry) = props.ry {
            self.rotation_y = ry;
            self.y = ry;
        }
        let pivot = Point::new(self.rotation_x, self.rotation_y);
        if pivot != self.cluster {
            debug!(
                rx = pivot.x,
                ry = pivot.y,
                angle = self.rotation_angle,
                "new rotation cluster"
            );
            self.cluster = pivot;
        }

        if let Some(dx) = props.x {
            self.x += dx;
        }
        if let Some(dy) = props.y {
            self.y += dy;
        }
        if let Some(w) = props.w {
            self.width = w;
            self.width2 = w;
        }
        if let Some(h) = props.h {
            self.height = h;
            self.height2 = h;
        }
        if let Some(x2) = props.x2 {
            self.x2 = x2;
        }
        if let Some(y2) = props.y2 {
            self.y2 = y2;
        }
        if let Some(w2) = props.w2 {
            self.width2 = w2;
        }
        if let Some(h2) = props.h2 {
            self.height2 = h2;
        }
    }

    fn emit(&self, labels: Vec<String>) -> Key {
        Key {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            x2: self.x2,
            y2: self.y2,
            width2: if self.width2 == 0.0 {
                self.width
            } else {
                self.width2
            },
            height2: if self.height2 == 0.0 {
                self.height
            } else {
                self.height2
            },
            rotation_angle: self.rotation_angle,
            rotation_x: self.rotation_x,
            rotation_y: self.rotation_y,
            labels,
        }
    }

    fn advance(&mut self) {
        self.x += self.width;
        self.width = 1.0;
        self.height = 1.0;
        self.x2 = 0.0;
        self.y2 = 0.0;
        self.width2 = 0.0;
        self.height2 = 0.0;
    }

    fn end_row(&mut self) {
        self.y += 1.0;
        self.x = self.rotation_x;
    }
}

fn split_labels(label: &str) -> Vec<String> {
    if label.is_empty() {
        return Vec::new();
    }
    label.split('\n').map(str::to_string).collect()
}

/// Resolve every key of `layout` to an absolute position in layout units, in reading order.
///
/// Entries of the top-level sequence that are not rows (board metadata) are skipped. The first
/// malformed item aborts the whole parse.
pub fn parse(layout: &LayoutDescription, options: ParseOptions) -> Result<Vec<Key>, Error> {
    let mut cursor = Cursor::new();
    let mut keys: Vec<Key> = Vec::new();

    for (row_index, row) in layout.rows.iter().enumerate() {
        let Value::Seq(items) = row else {
            debug!(row = row_index, kind = row.kind(), "skipping non-row entry");
            continue;
        };

        for (item_index, item) in items.iter().enumerate() {
            match item {
                Value::String(label) => {
                    let key = cursor.emit(split_labels(label));
                    trace!(
                        row = row_index,
                        item = item_index,
                        x = key.x,
                        y = key.y,
                        w = key.width,
                        h = key.height,
                        "key"
                    );
                    keys.push(key);
                    cursor.advance();
                }
                Value::Map(map) => {
                    let props = KeyProps::from_map(map, row_index, item_index)?;
                    if item_index > 0 && props.has_rotation() {
                        match options.rotation {
                            RotationPolicy::Strict => {
                                return Err(Error::InvalidRotationPlacement {
                                    row: row_index,
                                    item: item_index,
                                });
                            }
                            RotationPolicy::Lenient => {
                                debug!(
                                    row = row_index,
                                    item = item_index,
                                    "applying rotation metadata found mid-row"
                                );
                            }
                        }
                    }
                    cursor.apply(&props);
                }
                other => {
                    return Err(Error::MalformedLayout {
                        row: row_index,
                        item: item_index,
                        reason: format!(
                            "expected a label or a metadata object, got {}",
                            other.kind()
                        ),
                    });
                }
            }
        }

        cursor.end_row();
        debug!(row = row_index, total_keys = keys.len(), "parsed row");
    }

    Ok(keys)
}
