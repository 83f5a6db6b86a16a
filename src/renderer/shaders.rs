//! Shader catalog: key -> WGSL source, compiled under validation error
//! scopes so the backend's own diagnostics surface as `Err` values instead
//! of panics. There is no retry path anywhere here; every failure is a
//! build-time configuration defect.

use crate::renderer::GfxError;

const CATALOG: &[(&str, &str)] = &[
    ("Point", include_str!("../../shaders/point.wgsl")),
    ("Sprite", include_str!("../../shaders/sprite.wgsl")),
    ("Quad", include_str!("../../shaders/quad.wgsl")),
];

/// Looks up shader source text by key.
pub fn source(key: &str) -> Result<&'static str, GfxError> {
    CATALOG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, src)| *src)
        .ok_or_else(|| GfxError::MissingShader(key.to_string()))
}

/// Compiles the WGSL module for `key`.
pub fn load_module(device: &wgpu::Device, key: &str) -> Result<wgpu::ShaderModule, GfxError> {
    let src = source(key)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(key),
        source: wgpu::ShaderSource::Wgsl(src.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(GfxError::ShaderCompile {
            key: key.to_string(),
            detail: err.to_string(),
        });
    }

    Ok(module)
}

/// Runs a pipeline constructor under a validation scope, mapping failures to
/// [`GfxError::PipelineLink`].
pub fn link_pipeline<F>(
    device: &wgpu::Device,
    label: &str,
    build: F,
) -> Result<wgpu::RenderPipeline, GfxError>
where
    F: FnOnce() -> wgpu::RenderPipeline,
{
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = build();
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(GfxError::PipelineLink {
            label: label.to_string(),
            detail: err.to_string(),
        });
    }
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_resolves_known_keys() {
        for key in ["Point", "Sprite", "Quad"] {
            assert!(!source(key).unwrap().is_empty());
        }
    }

    #[test]
    fn test_missing_key_is_reported_by_name() {
        let err = source("Sprite.GS").unwrap_err();
        assert!(matches!(err, GfxError::MissingShader(ref k) if k == "Sprite.GS"));
    }
}
