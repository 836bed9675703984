//! Schema configuration.
//!
//! Schemas are described in JSON. Taxonomies are declared once by name and
//! referenced from rules:
//!
//! ```json
//! {
//!   "taxonomies": {
//!     "sectors": [
//!       { "code": "WASH", "level": 1 },
//!       { "code": "WASH-HYG", "parent": "WASH" }
//!     ]
//!   },
//!   "rules": [
//!     { "tag": "#sector", "minOccur": 1, "taxonomy": "sectors", "taxonomyLevel": 1 },
//!     { "tag": "#affected_num", "dataType": "number", "minValue": 0 }
//!   ]
//! }
//! ```
//!
//! Every malformed setting (bad regex, unknown data type, unknown taxonomy,
//! contradictory bounds) is rejected here, before any row is scanned.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use hxl_model::{Hashtag, Taxonomy, Term};
use serde::Deserialize;

use crate::data_type::DataType;
use crate::error::{Result, SchemaError};
use crate::rule::SchemaRule;
use crate::schema::Schema;
use crate::sink::ErrorSink;

/// Top-level schema document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub taxonomies: BTreeMap<String, Vec<Term>>,
    pub rules: Vec<RuleSpec>,
}

/// One rule as written in the configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSpec {
    pub tag: String,
    pub data_type: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub value_pattern: Option<String>,
    pub value_enumeration: Option<Vec<String>>,
    pub case_sensitive: Option<bool>,
    pub taxonomy: Option<String>,
    pub taxonomy_level: Option<u32>,
    pub min_occur: Option<usize>,
    pub max_occur: Option<usize>,
}

impl SchemaConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Build a schema whose rules report to `sink`.
    pub fn build(&self, sink: Arc<dyn ErrorSink>) -> Result<Schema> {
        let taxonomies: BTreeMap<&str, Arc<Taxonomy>> = self
            .taxonomies
            .iter()
            .map(|(name, terms)| {
                let taxonomy: Taxonomy = terms.iter().cloned().collect();
                (name.as_str(), Arc::new(taxonomy))
            })
            .collect();

        let mut schema = Schema::new(sink);
        for spec in &self.rules {
            schema.push_rule(spec.build(&taxonomies)?);
        }
        tracing::debug!(
            rules = schema.rules().len(),
            taxonomies = taxonomies.len(),
            "schema built"
        );
        Ok(schema)
    }
}

impl RuleSpec {
    /// Build a rule, resolving the taxonomy reference against `taxonomies`.
    pub fn build(&self, taxonomies: &BTreeMap<&str, Arc<Taxonomy>>) -> Result<SchemaRule> {
        let tag = Hashtag::parse(&self.tag)?;
        let mut rule = SchemaRule::new(tag.clone());

        if let Some(name) = &self.data_type {
            let data_type =
                DataType::parse(name).ok_or_else(|| SchemaError::UnknownDataType(name.clone()))?;
            rule = rule.with_data_type(data_type);
        }
        if let Some(min) = self.min_value {
            rule = rule.with_min_value(min);
        }
        if let Some(max) = self.max_value {
            rule = rule.with_max_value(max);
        }
        if let Some(pattern) = &self.value_pattern {
            rule = rule.with_pattern(pattern)?;
        }
        if let Some(values) = &self.value_enumeration {
            rule = rule.with_enumeration(values.iter().cloned());
        }
        if let Some(case_sensitive) = self.case_sensitive {
            rule = rule.with_case_sensitive(case_sensitive);
        }
        if let Some(name) = &self.taxonomy {
            let taxonomy =
                taxonomies
                    .get(name.as_str())
                    .ok_or_else(|| SchemaError::UnknownTaxonomy {
                        tag: tag.to_string(),
                        name: name.clone(),
                    })?;
            rule = rule.with_taxonomy(Arc::clone(taxonomy));
        }
        if let Some(level) = self.taxonomy_level {
            rule = rule.with_taxonomy_level(level);
        }
        if let Some(min) = self.min_occur {
            rule = rule.with_min_occur(min);
        }
        if let Some(max) = self.max_occur {
            rule = rule.with_max_occur(max);
        }

        rule.verify()?;
        Ok(rule)
    }
}

/// Read and build a schema from a JSON file.
pub fn load_schema(path: &Path, sink: Arc<dyn ErrorSink>) -> Result<Schema> {
    SchemaConfig::from_path(path)?.build(sink)
}
