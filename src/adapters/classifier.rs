//! Label-based image classifier adapter.
//!
//! Vision backends answer with a list of labels and confidences rather than
//! a yes/no.  [`LabeledImage`] carries such a result alongside the frame
//! and [`LabelClassifier`] applies the threshold: a cat is present when any
//! `cat` label (case-insensitive) reaches it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::ports::{ClassifierError, ImageClassifier};

/// One detected label.  `confidence` is a percentage (0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(name: &str, confidence: f32) -> Self {
        Self {
            name: name.to_owned(),
            confidence,
        }
    }
}

/// A camera frame reduced to the labels a vision backend found in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledImage {
    pub labels: Vec<Label>,
}

impl LabeledImage {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LabelClassifier {
    classified: u64,
}

impl LabelClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful classifications.
    pub fn classified(&self) -> u64 {
        self.classified
    }
}

impl ImageClassifier for LabelClassifier {
    type Image = LabeledImage;

    fn image_contains_cat(
        &mut self,
        image: &LabeledImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        if image
            .labels
            .iter()
            .any(|l| !(0.0..=100.0).contains(&l.confidence))
        {
            return Err(ClassifierError::InvalidImage);
        }

        let best = image
            .labels
            .iter()
            .filter(|l| l.name.eq_ignore_ascii_case("cat"))
            .map(|l| l.confidence)
            .reduce(f32::max);

        self.classified += 1;
        debug!("LabelClassifier: best cat confidence {:?}", best);
        Ok(best.is_some_and(|c| c >= confidence_threshold))
    }
}
