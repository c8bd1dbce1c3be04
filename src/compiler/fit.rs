use crate::scene::{Camera, Node};

/// Upper bound on halvings; a mesh still too large after this many is left
/// at the last scale.
const MAX_HALVINGS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// Geometry lacks width/height, or the camera sees nothing at that depth.
    Skipped,
    /// `scale_changes` is zero when the mesh already fit.
    Fitted { scale_changes: u32, scale: f32 },
}

/// Shrinks a node until its geometry's width and height fit the camera's
/// visible extent at the node's depth.
///
/// Each pass sets the uniform scale to `1/n`, with `n` starting at 2 and
/// doubling, and re-checks the scaled extent.
pub fn fit_on_screen(node: &mut Node, camera: &Camera) -> FitOutcome {
    let params = node.geometry().map(|g| g.parameters);
    let (Some(width), Some(height)) = (params.and_then(|p| p.width), params.and_then(|p| p.height)) else {
        log::warn!("fit_on_screen: '{}' has no width/height geometry parameters, skipping", node.name);
        return FitOutcome::Skipped;
    };

    let visible = camera.visible_size_at(node.transform.position);
    if visible.x <= 0.0 || visible.y <= 0.0 {
        log::warn!("fit_on_screen: camera sees no extent at the depth of '{}', skipping", node.name);
        return FitOutcome::Skipped;
    }

    let mut scale = 1.0;
    let mut n = 2.0;
    let mut changes = 0;
    while (width * scale > visible.x || height * scale > visible.y) && changes < MAX_HALVINGS {
        scale = 1.0 / n;
        n *= 2.0;
        changes += 1;
    }

    if changes > 0 {
        node.transform.set_uniform_scale(scale);
        log::debug!("fit_on_screen: '{}' scaled to {scale} after {changes} halvings", node.name);
    }
    FitOutcome::Fitted {
        scale_changes: changes,
        scale,
    }
}
