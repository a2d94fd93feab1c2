use termloop_types::{sgr_on_codes, Color, Style, StyleState};

/// Compute the SGR sequence needed to move the writer's active style from
/// `prev` to `next`, or `None` if nothing needs to change.
///
/// - Unknown `prev` (first cell, or right after a full clear): full style,
///   *except* when `next` is the terminal default style, in which case an
///   unknown writer state is already indistinguishable from it and nothing
///   needs to be emitted.
/// - Identical style: nothing.
/// - `next` drops an attribute `prev` had, or stops specifying a color
///   `prev` had set: no partial SGR code removes a single attribute or
///   color, so the writer resets (`SGR 0`) and rebuilds the whole style.
/// - Otherwise: only the codes for newly-added attributes and changed
///   colors, nothing for what stayed the same.
pub fn style_delta(prev: StyleState, next: Style) -> Option<String> {
    let prev_style = match prev.get() {
        None if next == Style::default() => return None,
        None => return Some(encode_full(next)),
        Some(s) => s,
    };
    if prev_style == next {
        return None;
    }

    let removed_attrs = prev_style.attrs & !next.attrs;
    let fg_regressed = prev_style.fg.is_some() && next.fg.is_none();
    let bg_regressed = prev_style.bg.is_some() && next.bg.is_none();
    if !removed_attrs.is_empty() || fg_regressed || bg_regressed {
        return Some(encode_full(next));
    }

    let added_attrs = next.attrs & !prev_style.attrs;
    let mut codes = Vec::new();
    if !added_attrs.is_empty() {
        codes.extend(sgr_on_codes(added_attrs));
    }
    if prev_style.fg != next.fg {
        if let Some(fg) = next.fg {
            codes.extend(fg_codes(fg));
        }
    }
    if prev_style.bg != next.bg {
        if let Some(bg) = next.bg {
            codes.extend(bg_codes(bg));
        }
    }

    if codes.is_empty() {
        // Style differs only in fields that can't happen here; be safe.
        return Some(encode_full(next));
    }
    Some(format_sgr(&codes))
}

/// A full, self-contained SGR sequence for `style`, starting with an
/// explicit reset so it is correct regardless of what came before.
pub fn encode_full(style: Style) -> String {
    let mut codes = vec![0u16];
    codes.extend(sgr_on_codes(style.attrs));
    if let Some(fg) = style.fg {
        codes.extend(fg_codes(fg));
    }
    if let Some(bg) = style.bg {
        codes.extend(bg_codes(bg));
    }
    format_sgr(&codes)
}

fn fg_codes(color: Color) -> Vec<u16> {
    match color {
        Color::Default => vec![39],
        Color::Named(n) => vec![n.sgr_fg()],
        Color::Palette256(idx) => vec![38, 5, idx as u16],
        Color::Rgb(r, g, b) => vec![38, 2, r as u16, g as u16, b as u16],
    }
}

fn bg_codes(color: Color) -> Vec<u16> {
    match color {
        Color::Default => vec![49],
        Color::Named(n) => vec![n.sgr_bg()],
        Color::Palette256(idx) => vec![48, 5, idx as u16],
        Color::Rgb(r, g, b) => vec![48, 2, r as u16, g as u16, b as u16],
    }
}

fn format_sgr(codes: &[u16]) -> String {
    let parts: Vec<String> = codes.iter().map(u16::to_string).collect();
    format!("\x1b[{}m", parts.join(";"))
}
