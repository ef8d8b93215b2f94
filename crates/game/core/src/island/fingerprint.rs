//! Canonical SHA-256 digest of an island.
//!
//! Every string is length-prefixed and every optional value carries a presence
//! byte, so distinct islands cannot collide by concatenation.

use sha2::{Digest, Sha256};

use super::{ActionKind, Island};

pub(super) fn digest(island: &Island) -> [u8; 32] {
    let mut hasher = Sha256::new();

    write_str(&mut hasher, &island.id);
    hasher.update(island.required_gems.to_le_bytes());

    hasher.update((island.nodes.len() as u64).to_le_bytes());
    for node in island.nodes.values() {
        write_str(&mut hasher, &node.id);
        write_str(&mut hasher, &node.title);
        write_str(&mut hasher, node.kind.as_ref());
        write_str(&mut hasher, &node.biome);
        write_opt_str(&mut hasher, node.color.as_deref());
        hasher.update(node.position.x.to_le_bytes());
        hasher.update(node.position.y.to_le_bytes());

        hasher.update((node.features.len() as u64).to_le_bytes());
        for feature in &node.features {
            write_str(&mut hasher, &feature.id);
            write_str(&mut hasher, feature.kind.as_ref());
            write_opt_str(&mut hasher, feature.action_id.as_deref());
            write_opt_str(&mut hasher, feature.item.as_deref());
            write_opt_u32(&mut hasher, feature.amount);
        }

        hasher.update((node.actions.len() as u64).to_le_bytes());
        for action in &node.actions {
            write_str(&mut hasher, &action.id);
            write_str(&mut hasher, &action.label);
            write_str(&mut hasher, action.kind.name());
            match &action.kind {
                ActionKind::Move { to } => write_str(&mut hasher, to),
                ActionKind::Pickup { item, amount } => {
                    write_str(&mut hasher, item);
                    write_opt_u32(&mut hasher, *amount);
                }
                ActionKind::Say { line } => write_str(&mut hasher, line),
                ActionKind::Ship | ActionKind::Reset => {}
            }
        }
    }

    hasher.update((island.map_landmarks.len() as u64).to_le_bytes());
    for landmark in &island.map_landmarks {
        write_str(&mut hasher, &landmark.id);
        write_str(&mut hasher, landmark.kind.as_ref());
        hasher.update(landmark.position.x.to_le_bytes());
        hasher.update(landmark.position.y.to_le_bytes());
    }

    hasher.finalize().into()
}

fn write_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn write_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update([1u8]);
            write_str(hasher, value);
        }
        None => hasher.update([0u8]),
    }
}

fn write_opt_u32(hasher: &mut Sha256, value: Option<u32>) {
    match value {
        Some(value) => {
            hasher.update([1u8]);
            hasher.update(value.to_le_bytes());
        }
        None => hasher.update([0u8]),
    }
}
