//! Property callbacks of transform move filters: the edits a settings UI performs.

use crate::{
    config::model::NEXT_MOVE_REVERSE,
    engine::{
        registry::{FilterNode, FilterTable},
        transform_move::TransformMove,
    },
    foundation::ids::FilterId,
    host::scene::SceneHost,
};

/// Replace the summary text and take the target from it.
///
/// Returns `true` when the text was rejected and regenerated, i.e. the UI must refresh.
pub fn transform_text_changed(mv: &mut TransformMove, text: &str) -> bool {
    mv.settings.transform_text = text.to_owned();
    mv.settings.apply_transform_text()
}

/// Copy the live item transform into the target.
///
/// In relative mode the target becomes the offset of the live item from the last resolved end
/// point. Returns `false` when no item could be resolved.
pub fn capture_transform<H: SceneHost + ?Sized>(
    mv: &mut TransformMove,
    host: &H,
    scene: &str,
) -> bool {
    let Some(live) = mv
        .resolve_target(host, scene)
        .and_then(|item| host.transform(item))
    else {
        return false;
    };
    mv.settings.target = if mv.settings.relative {
        live.difference(&mv.to)
    } else {
        live
    };
    mv.settings.refresh_transform_text();
    true
}

/// Switch between absolute and relative targets, converting the target against the live item.
///
/// Returns whether anything changed.
pub fn relative_changed<H: SceneHost + ?Sized>(
    mv: &mut TransformMove,
    host: &H,
    scene: &str,
    relative: bool,
) -> bool {
    if mv.settings.relative == relative {
        return false;
    }
    mv.settings.relative = relative;
    let live = mv
        .resolve_target(host, scene)
        .and_then(|item| host.transform(item));
    if let Some(live) = live {
        mv.settings.target = if relative {
            mv.settings.target.difference(&live)
        } else {
            live.offset(&mv.settings.target, 1.0)
        };
    }
    mv.settings.refresh_transform_text();
    true
}

/// Names offered as `next_move`: none, the reverse sentinel, then every move filter on the
/// owner and on the animated source.
pub fn next_move_candidates(table: &FilterTable, id: FilterId) -> Vec<String> {
    let mut names = vec![String::new(), NEXT_MOVE_REVERSE.to_owned()];
    let Ok(slot) = table.get(id) else {
        return names;
    };
    let target = match &slot.node {
        FilterNode::TransformMove(m) => Some(m.settings.source.as_str()),
        _ => None,
    };
    let scopes = std::iter::once(slot.parent.as_str()).chain(target.filter(|s| !s.is_empty()));
    for scope in scopes {
        for (_, other) in table.attached_to(scope) {
            if other.node.node_kind().is_move() && !names.contains(&other.name) {
                names.push(other.name.clone());
            }
        }
    }
    names
}

#[cfg(test)]
#[path = "../../tests/unit/engine/props.rs"]
mod tests;
