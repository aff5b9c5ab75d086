//! Path features: subdirectory depth and length

use super::vector::FeatureVector;
use super::{char_len, count, FeatureExtractor};

pub struct PathFeatures<'a> {
    path: &'a str,
}

impl<'a> PathFeatures<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { path }
    }

    /// A single slash counts as zero subdirectories
    pub fn num_subdirs(&self) -> u32 {
        count(self.path.matches('/').count().saturating_sub(1))
    }

    pub fn path_length(&self) -> u32 {
        char_len(self.path)
    }
}

impl FeatureExtractor for PathFeatures<'_> {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("num_subdirs", self.num_subdirs());
        vector.set_by_name("path_length", self.path_length());
    }
}
