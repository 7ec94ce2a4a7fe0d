//! Browsing filters and the option lists they are picked from.

use super::{Variant, natural_size_cmp};

/// Narrow the catalog by gender, garment, color or size.
///
/// Unset or empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFilter {
    /// Gender category to keep
    pub gender_category: Option<String>,

    /// Garment name to keep
    pub garment_name: Option<String>,

    /// Color to keep
    pub color: Option<String>,

    /// Keep variants listing this size
    pub size: Option<String>,
}

impl VariantFilter {
    /// Whether a variant passes every set criterion.
    pub fn matches(&self, variant: &Variant<'_>) -> bool {
        criterion_matches(self.gender_category.as_deref(), variant.gender_category())
            && criterion_matches(self.garment_name.as_deref(), variant.garment_name())
            && criterion_matches(self.color.as_deref(), variant.color())
            && self
                .size
                .as_deref()
                .is_none_or(|size| size.is_empty() || variant.size(size).is_some())
    }
}

fn criterion_matches(criterion: Option<&str>, value: &str) -> bool {
    criterion.is_none_or(|criterion| criterion.is_empty() || criterion == value)
}

/// Distinct values offered for each filter.
///
/// Genders, garments and colors keep first-seen order; sizes are sorted with
/// [`natural_size_cmp`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFacets {
    /// Gender categories
    pub gender_categories: Vec<String>,

    /// Garment names
    pub garment_names: Vec<String>,

    /// Colors
    pub colors: Vec<String>,

    /// Size labels
    pub sizes: Vec<String>,
}

impl VariantFacets {
    /// Collect the facets of a set of variants.
    pub fn from_variants<'v, 'a: 'v>(variants: impl IntoIterator<Item = &'v Variant<'a>>) -> Self {
        let mut facets = Self::default();

        for variant in variants {
            push_distinct(&mut facets.gender_categories, variant.gender_category());
            push_distinct(&mut facets.garment_names, variant.garment_name());
            push_distinct(&mut facets.colors, variant.color());

            for line in variant.sizes() {
                push_distinct(&mut facets.sizes, line.size());
            }
        }

        facets.sizes.sort_by(|a, b| natural_size_cmp(a, b));

        facets
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
