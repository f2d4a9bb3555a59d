//! `ModelAdmin` registration template.

use scribe_core::{ArtifactKind, ClassificationTag, ModelDescriptor};

use super::{PyModule, lookup_path};
use crate::layout::{class_name, models_module};
use crate::resolve::EffectiveFieldSet;

/// Django's own row label; used when no identifier or ordinary field remains.
const STR_COLUMN: &str = "__str__";

pub(super) fn render(model: &ModelDescriptor, fields: &EffectiveFieldSet) -> String {
    let mut py = PyModule::new(ArtifactKind::Admin, model);
    py.import("django.contrib", "admin");
    py.blank();
    py.import(&models_module(model), &model.name);
    py.blank();
    py.blank();
    py.line(0, format!("@admin.register({})", model.name));
    py.line(
        0,
        format!(
            "class {}(admin.ModelAdmin):",
            class_name(model, ArtifactKind::Admin)
        ),
    );

    let mut list_display = fields.list_display();
    if list_display.is_empty() {
        list_display.push(STR_COLUMN);
    }
    let search: Vec<String> = fields.search_paths().into_iter().map(lookup_path).collect();
    let readonly: Vec<&str> = fields
        .with_tag(ClassificationTag::Audit)
        .map(|f| f.name.as_str())
        .collect();

    py.string_list(1, "list_display", &list_display);
    py.string_list(1, "search_fields", &search);
    py.string_list(1, "list_filter", &fields.filter_fields());
    py.string_list(1, "readonly_fields", &readonly);
    py.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{effective, order};
    use pretty_assertions::assert_eq;
    use scribe_config::GenerationConfig;
    use scribe_core::{FieldDescriptor, FieldKind};

    #[test]
    fn order_admin() {
        let model = order()
            .with_field(FieldDescriptor::new("is_paid", FieldKind::Boolean))
            .with_field(FieldDescriptor::new("updated_at", FieldKind::Timestamp));
        let text = render(&model, &effective(&model, &GenerationConfig::default()));
        let body: Vec<&str> = text.lines().skip(8).collect();
        assert_eq!(
            body.join("\n"),
            r#"@admin.register(Order)
class OrderAdmin(admin.ModelAdmin):
    list_display = [
        "id",
        "total",
        "is_paid",
    ]
    search_fields = [
        "notes",
    ]
    list_filter = [
        "is_paid",
        "updated_at",
    ]
    readonly_fields = [
        "updated_at",
    ]"#
        );
    }

    #[test]
    fn falls_back_to_str_column() {
        let model = ModelDescriptor::new("Note", "wiki")
            .with_field(FieldDescriptor::new("body", FieldKind::Text));
        let text = render(&model, &effective(&model, &GenerationConfig::default()));
        assert!(text.contains("    list_display = [\n        \"__str__\",\n    ]\n"));
        assert!(text.contains("    list_filter = []\n"));
    }
}
