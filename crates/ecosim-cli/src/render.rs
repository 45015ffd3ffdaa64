//! Plain-text views of a world.

use ecosim_core::Kind;
use ecosim_world::{AbilityStatus, World};

/// One character per tile: the occupant's symbol, or `.` when empty.
pub fn render_grid(world: &World) -> String {
    let mut out = String::with_capacity((world.width() + 1) * world.height());
    for y in 0..world.height() {
        for x in 0..world.width() {
            out.push(world.organism_at(x, y).map_or('.', |o| o.kind.symbol()));
        }
        out.push('\n');
    }
    out
}

/// Population per kind and the human's state
pub fn summary(world: &World) -> String {
    let mut out = format!(
        "Turn {}: {} organisms",
        world.time(),
        world.organism_count()
    );

    let counts: Vec<String> = Kind::ALL
        .iter()
        .filter_map(|&kind| {
            let count = world.iter().filter(|o| o.kind == kind).count();
            (count > 0).then(|| format!("{kind} {count}"))
        })
        .collect();
    if !counts.is_empty() {
        out.push_str(&format!(" ({})", counts.join(", ")));
    }

    match world.human_organism().and_then(|h| h.controls.map(|c| (h, c))) {
        Some((human, controls)) => {
            let ability = match controls.immortality.status() {
                AbilityStatus::Ready => "ready".to_string(),
                AbilityStatus::Armed => "armed".to_string(),
                AbilityStatus::Active { turns_left } => format!("active, {turns_left} turns left"),
                AbilityStatus::Cooldown { turns_left } => {
                    format!("cooling down, {turns_left} turns left")
                }
            };
            let position = world.grid().position_of(human.tile);
            out.push_str(&format!(
                "\n{human} at ({}, {}), immortality {ability}",
                position.x, position.y
            ));
        }
        None => out.push_str("\nNo human in the world"),
    }
    out
}
