//! Host features: '@', '-', dotted quad, length, dots
//!
//! `has_ip` is a shape check only: octets are not range-checked
//! ("999.999.999.999" matches) and bracketed IPv6 literals never match.

use once_cell::sync::Lazy;
use regex::Regex;

use super::vector::FeatureVector;
use super::{char_len, count, flag, FeatureExtractor};

static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$")
        .expect("dotted quad pattern is valid")
});

/// Whole-string dotted-quad match, no partial matches
pub fn is_dotted_quad(host: &str) -> bool {
    DOTTED_QUAD.is_match(host)
}

pub struct HostFeatures<'a> {
    host: &'a str,
}

impl<'a> HostFeatures<'a> {
    pub fn new(host: &'a str) -> Self {
        Self { host }
    }

    pub fn has_at(&self) -> u32 {
        flag(self.host.contains('@'))
    }

    pub fn has_dash(&self) -> u32 {
        flag(self.host.contains('-'))
    }

    pub fn has_ip(&self) -> u32 {
        flag(is_dotted_quad(self.host))
    }

    pub fn hostname_length(&self) -> u32 {
        char_len(self.host)
    }

    pub fn num_dots_domain(&self) -> u32 {
        count(self.host.matches('.').count())
    }
}

impl FeatureExtractor for HostFeatures<'_> {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("has_at", self.has_at());
        vector.set_by_name("has_dash", self.has_dash());
        vector.set_by_name("has_ip", self.has_ip());
        vector.set_by_name("hostname_length", self.hostname_length());
        vector.set_by_name("num_dots_domain", self.num_dots_domain());
    }
}
