use crate::compiler::AssetCache;
use crate::descriptor::ObjectDescriptor;
use crate::resources::{Material, MaterialKind};

/// Builds the material a descriptor asks for.
///
/// Default kind is wireframe, default color white. Unknown kinds fall back
/// to an opaque basic material.
#[must_use]
pub fn build_material(descriptor: &ObjectDescriptor, assets: &AssetCache) -> Material {
    let color = descriptor.resolved_color();

    let mut material = match descriptor.material_kind() {
        MaterialKind::Basic => Material::basic(color).with_transparency(),
        MaterialKind::Normal => Material::normal(),
        MaterialKind::Wireframe => Material::wireframe(),
        MaterialKind::Phong => Material::phong(color),
        MaterialKind::Lambert => Material::lambert(color),
        MaterialKind::Line => Material::line(color),
        MaterialKind::Fallback(name) => {
            log::warn!("Unknown material '{name}' on '{}', using basic", descriptor.display_name());
            Material::basic(color)
        }
    };

    if let Some(url) = descriptor.texture.as_deref() {
        match assets.texture(url) {
            Some(texture) => material = material.with_map(texture.clone()),
            None => log::warn!("Texture '{url}' was not preloaded; '{}' renders untextured", descriptor.display_name()),
        }
    }

    if let Some(opacity) = descriptor.opacity {
        material.set_opacity(opacity);
    }
    material.needs_update = false;
    material
}
