//! `ModelSerializer` template.

use scribe_core::{ArtifactKind, ModelDescriptor};

use super::PyModule;
use crate::layout::{class_name, models_module};
use crate::resolve::EffectiveFieldSet;

pub(super) fn render(model: &ModelDescriptor, fields: &EffectiveFieldSet) -> String {
    let mut py = PyModule::new(ArtifactKind::Serializer, model);
    py.import("rest_framework", "serializers");
    py.blank();
    py.import(&models_module(model), &model.name);
    py.blank();
    py.blank();
    py.line(
        0,
        format!(
            "class {}(serializers.ModelSerializer):",
            class_name(model, ArtifactKind::Serializer)
        ),
    );
    py.line(1, "class Meta:");
    py.line(2, format!("model = {}", model.name));
    py.string_list(2, "fields", &fields.names());
    py.string_list(2, "read_only_fields", &fields.read_only());
    py.finish()
}
