//! `FilterSet` template (django-filter), referenced by the viewset.

use scribe_core::{ArtifactKind, ClassificationTag, FieldKind, ModelDescriptor};

use super::{PyModule, quoted};
use crate::classify::ClassifiedField;
use crate::layout::{class_name, models_module};
use crate::resolve::EffectiveFieldSet;

/// Lookups exposed for one field; `None` leaves the field unfilterable.
fn lookups(field: &ClassifiedField) -> Option<&'static [&'static str]> {
    if field.tag == ClassificationTag::Identifier {
        return Some(&["exact", "in"]);
    }
    match field.kind {
        FieldKind::Text => Some(&["exact", "icontains"]),
        FieldKind::Numeric => Some(&["exact", "gte", "lte"]),
        FieldKind::Timestamp => Some(&["gte", "lte"]),
        FieldKind::Boolean | FieldKind::Relation | FieldKind::Unknown(_) => Some(&["exact"]),
        FieldKind::Binary => None,
    }
}

pub(super) fn render(model: &ModelDescriptor, fields: &EffectiveFieldSet) -> String {
    let mut py = PyModule::new(ArtifactKind::Filter, model);
    py.import("django_filters", "rest_framework as filters");
    py.blank();
    py.import(&models_module(model), &model.name);
    py.blank();
    py.blank();
    py.line(
        0,
        format!(
            "class {}(filters.FilterSet):",
            class_name(model, ArtifactKind::Filter)
        ),
    );
    py.line(1, "class Meta:");
    py.line(2, format!("model = {}", model.name));

    let entries: Vec<(&str, &[&str])> = fields
        .fields
        .iter()
        .filter_map(|f| lookups(f).map(|l| (f.name.as_str(), l)))
        .collect();
    if entries.is_empty() {
        py.line(2, "fields = {}");
    } else {
        py.line(2, "fields = {");
        for (name, lookups) in entries {
            let quoted_lookups: Vec<String> = lookups.iter().map(|l| quoted(l)).collect();
            py.line(
                3,
                format!("{}: [{}],", quoted(name), quoted_lookups.join(", ")),
            );
        }
        py.line(2, "}");
    }
    py.finish()
}
