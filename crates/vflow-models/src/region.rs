//! Normalized bounding boxes and tagged regions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A normalized bounding box (0.0 to 1.0) relative to the image frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// X coordinate of the top-left corner (0.0 = left, 1.0 = right)
    pub left: f64,
    /// Y coordinate of the top-left corner (0.0 = top, 1.0 = bottom)
    pub top: f64,
    /// Width of the box (0.0 to 1.0)
    pub width: f64,
    /// Height of the box (0.0 to 1.0)
    pub height: f64,
}

impl BoundingBox {
    /// Create a new normalized bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check if the box is valid (within 0.0-1.0 range).
    pub fn is_valid(&self) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.left + self.width <= 1.001 // Allow small epsilon for float precision
            && self.top + self.height <= 1.001
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Errors parsing a normalized label line.
#[derive(Debug, Error, PartialEq)]
pub enum RegionParseError {
    #[error("expected 4 coordinates (left top width height), got {0}")]
    FieldCount(usize),

    #[error("invalid coordinate '{value}'")]
    InvalidCoordinate { value: String },
}

impl FromStr for BoundingBox {
    type Err = RegionParseError;

    /// Parse a label-file line of four whitespace-separated floats:
    /// `left top width height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(RegionParseError::FieldCount(fields.len()));
        }

        let mut coords = [0.0f64; 4];
        for (slot, field) in coords.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| RegionParseError::InvalidCoordinate {
                    value: (*field).to_string(),
                })?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }
}

/// A bounding box assigning a tag to a sub-area of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Tag assigned to this region
    pub tag_id: Uuid,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Associate a bounding box with a tag.
    pub fn new(tag_id: Uuid, bbox: BoundingBox) -> Self {
        Self {
            tag_id,
            left: bbox.left,
            top: bbox.top,
            width: bbox.width,
            height: bbox.height,
        }
    }

    /// The region's bounding box without its tag association.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_line() {
        let bbox: BoundingBox = "0.1 0.2 0.3 0.4".parse().unwrap();
        assert_eq!(bbox.left, 0.1);
        assert_eq!(bbox.top, 0.2);
        assert_eq!(bbox.width, 0.3);
        assert_eq!(bbox.height, 0.4);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let bbox: BoundingBox = "  0.5\t0.25   0.125 0.0625 ".parse().unwrap();
        assert_eq!(bbox.left, 0.5);
        assert_eq!(bbox.height, 0.0625);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = "0.1 0.2 0.3".parse::<BoundingBox>().unwrap_err();
        assert_eq!(err, RegionParseError::FieldCount(3));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = "0.1 0.2 x 0.4".parse::<BoundingBox>().unwrap_err();
        assert_eq!(
            err,
            RegionParseError::InvalidCoordinate {
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_bounding_box_validity() {
        assert!(BoundingBox::new(0.1, 0.2, 0.3, 0.4).is_valid());
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!BoundingBox::new(-0.1, 0.2, 0.3, 0.4).is_valid());
        assert!(!BoundingBox::new(0.8, 0.2, 0.3, 0.4).is_valid());
        assert!(!BoundingBox::new(0.1, 0.2, 0.0, 0.4).is_valid());
    }

    #[test]
    fn test_region_wire_format_is_camel_case() {
        let region = Region::new(Uuid::nil(), BoundingBox::new(0.1, 0.2, 0.3, 0.4));
        let json = serde_json::to_value(&region).unwrap();
        assert!(json.get("tagId").is_some());
        assert_eq!(json["left"], 0.1);
    }
}
