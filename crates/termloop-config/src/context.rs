use crate::keys::ConfigFile;

/// Inclusive bounds for `fps`, matching the frame scheduler's own clamp
/// (kept in sync manually since `termloop-config` does not depend on
/// `termloop-scheduler` — it is a leaf crate).
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// Applies the process-wide clamps a [`ConfigFile`] needs before the
/// runtime starts, mirroring the teacher's `apply_context` pattern: values
/// outside their valid range are pulled back in range rather than
/// rejected, and every clamp that actually changes something is logged at
/// `info` so a misconfigured `fps`/`message_queue_cap` is visible without
/// failing startup.
pub fn apply_context(file: &mut ConfigFile) {
    let raw_fps = file.fps;
    let clamped_fps = raw_fps.clamp(MIN_FPS, MAX_FPS);
    if clamped_fps != raw_fps {
        tracing::info!(
            target: "config",
            raw = raw_fps,
            clamped = clamped_fps,
            "fps_clamped"
        );
    }
    file.fps = clamped_fps;

    if file.message_queue_cap == 0 {
        tracing::info!(target: "config", raw = 0, clamped = 1, "message_queue_cap_clamped");
        file.message_queue_cap = 1;
    }

    if file.render_buffer_threshold == 0 {
        tracing::info!(target: "config", raw = 0, clamped = 1, "render_buffer_threshold_clamped");
        file.render_buffer_threshold = 1;
    }
}
