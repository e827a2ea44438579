//! Detection prediction results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::region::BoundingBox;

/// One detection returned by the published model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrediction {
    /// Confidence in [0,1]
    pub probability: f64,
    pub tag_id: Uuid,
    pub tag_name: String,
    pub bounding_box: BoundingBox,
}

/// Detection response for one submitted image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Vec<ImagePrediction>,
}

impl PredictionResponse {
    /// Predictions sorted by descending confidence.
    pub fn ranked(&self) -> Vec<&ImagePrediction> {
        let mut ranked: Vec<&ImagePrediction> = self.predictions.iter().collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(tag: &str, probability: f64) -> ImagePrediction {
        ImagePrediction {
            probability,
            tag_id: Uuid::nil(),
            tag_name: tag.to_string(),
            bounding_box: BoundingBox::new(0.0, 0.0, 0.5, 0.5),
        }
    }

    #[test]
    fn test_ranked_sorts_descending() {
        let response = PredictionResponse {
            predictions: vec![
                prediction("apple", 0.42),
                prediction("banana", 0.97),
                prediction("orange", 0.10),
            ],
        };

        let ranked = response.ranked();
        let names: Vec<&str> = ranked.iter().map(|p| p.tag_name.as_str()).collect();
        assert_eq!(names, vec!["banana", "apple", "orange"]);
    }

    #[test]
    fn test_empty_response_deserializes() {
        let response: PredictionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.predictions.is_empty());
    }
}
