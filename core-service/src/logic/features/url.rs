//! Whole-URL features: length, dots, https, digits

use super::vector::FeatureVector;
use super::{char_len, count, flag, FeatureExtractor};

pub struct UrlFeatures<'a> {
    url: &'a str,
    scheme: &'a str,
}

impl<'a> UrlFeatures<'a> {
    pub fn new(url: &'a str, scheme: &'a str) -> Self {
        Self { url, scheme }
    }

    pub fn length(&self) -> u32 {
        char_len(self.url)
    }

    pub fn num_dots(&self) -> u32 {
        count(self.url.matches('.').count())
    }

    pub fn has_https(&self) -> u32 {
        flag(self.scheme == "https")
    }

    /// ASCII decimal digits only
    pub fn num_digits(&self) -> u32 {
        count(self.url.chars().filter(char::is_ascii_digit).count())
    }
}

impl FeatureExtractor for UrlFeatures<'_> {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("length", self.length());
        vector.set_by_name("num_dots", self.num_dots());
        vector.set_by_name("has_https", self.has_https());
        vector.set_by_name("num_digits", self.num_digits());
    }
}
