//! Line of sight between two units
//!
//! A hex blocks sight when its floor rises above both units' eye levels,
//! or above the nearer unit's eye level when it is right next to that
//! unit. Woods stand `WOODS_HEIGHT` above the floor and only obscure;
//! enough of them together block.

use crate::board::{intervening, to_line_order, Coords, Hex, TerrainKind};
use crate::core::constants::{HEX_LINE_BEARINGS, WOODS_BLOCK_THRESHOLD, WOODS_HEIGHT};
use crate::core::error::Result;
use crate::entity::{height, Entity};
use crate::game::Game;

/// What the line of sight passes through on its way
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LosEffects {
    pub light_woods: u32,
    pub heavy_woods: u32,
    pub target_partial_cover: bool,
    pub attacker_partial_cover: bool,
}

impl LosEffects {
    /// Light woods count once, heavy woods twice
    pub fn woods_value(&self) -> u32 {
        self.light_woods + self.heavy_woods * 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sightline {
    Clear(LosEffects),
    Blocked(&'static str),
}

impl Sightline {
    pub fn is_clear(&self) -> bool {
        matches!(self, Sightline::Clear(_))
    }
}

const BLOCKED_BY_TERRAIN: &str = "LOS blocked by terrain";
const BLOCKED_BY_WOODS: &str = "LOS blocked by woods";

/// Eye levels of the two units
struct Eyes {
    attacker: i32,
    target: i32,
}

impl Eyes {
    fn of(game: &Game, attacker: &Entity, target: &Entity) -> Result<Self> {
        Ok(Self {
            attacker: game.abs_height_of(attacker)?,
            target: game.abs_height_of(target)?,
        })
    }

    /// Does something rising to `level` get in the way? `near_attacker`
    /// and `near_target` mark hexes right next to either end.
    fn obstructed(&self, level: i32, near_attacker: bool, near_target: bool) -> bool {
        (level > self.attacker && level > self.target)
            || (near_attacker && level > self.attacker)
            || (near_target && level > self.target)
    }
}

/// Line of sight for weapon fire, with the hexes it crosses and the cover
/// they give.
///
/// When the line runs exactly along hex edges it passes between two hexes
/// at a time. Each such pair is settled as the defender would prefer:
/// partial cover when it is on offer, otherwise the thicker woods.
pub fn sightline(game: &Game, attacker: &Entity, target: &Entity) -> Result<Sightline> {
    let eyes = Eyes::of(game, attacker, target)?;
    let mut line = intervening(attacker.position, target.position);

    let mut degree = attacker.position.degree(&target.position);
    if degree > 180 {
        degree = (degree + 180) % 360;
    }
    if HEX_LINE_BEARINGS.contains(&degree) {
        match settle_hex_line(game, attacker, target, &eyes, line)? {
            Ok(settled) => line = settled,
            Err(reason) => return Ok(Sightline::Blocked(reason)),
        }
    }

    trace(game, attacker, target, &eyes, &line)
}

/// Can `attacker` see `target` at all? Looks at every hex the line touches.
pub fn can_see(game: &Game, attacker: &Entity, target: &Entity) -> Result<bool> {
    let eyes = Eyes::of(game, attacker, target)?;
    let line = intervening(attacker.position, target.position);
    Ok(trace(game, attacker, target, &eyes, &line)?.is_clear())
}

/// Pick one hex out of each pair the line runs between. The outer result
/// is a board error, the inner one a blocked line.
fn settle_hex_line(
    game: &Game,
    attacker: &Entity,
    target: &Entity,
    eyes: &Eyes,
    mut line: Vec<Coords>,
) -> Result<std::result::Result<Vec<Coords>, &'static str>> {
    to_line_order(&mut line, attacker.position);
    let n = line.len();
    let Some(&first) = line.first() else {
        return Ok(Ok(line));
    };

    let mut settled = vec![first];
    let mut woods_total = 0;
    let mut i = 1;
    while i + 2 < n {
        let (c1, c2) = (line[i], line[i + 1]);
        settled.push(line[i + 2]);
        let at_attacker = i == 1;
        let at_target = i + 3 == n;

        let (h1, h2) = match (game.board.hex(c1), game.board.hex(c2)) {
            (None, _) => {
                settled.push(c2);
                i += 3;
                continue;
            }
            (Some(_), None) => {
                settled.push(c1);
                i += 3;
                continue;
            }
            (Some(h1), Some(h2)) => (h1, h2),
        };
        let (el1, el2) = (h1.floor(), h2.floor());

        if eyes.obstructed(el1, at_attacker, at_target) || eyes.obstructed(el2, at_attacker, at_target) {
            return Ok(Err(BLOCKED_BY_TERRAIN));
        }

        let woods_weight = |hex: &Hex, el: i32| -> i32 {
            let level = hex.level_of(TerrainKind::Woods);
            if level > 0 && eyes.obstructed(el + WOODS_HEIGHT, at_attacker, at_target) {
                if level == 1 {
                    1
                } else {
                    2
                }
            } else {
                0
            }
        };
        let w1 = woods_weight(h1, el1);
        let w2 = woods_weight(h2, el2);

        if at_attacker {
            let attacker_cover = |el: i32| {
                el == eyes.attacker && eyes.attacker >= eyes.target && height(attacker) > 0
            };
            if attacker_cover(el1) {
                settled.push(c1);
                i += 3;
                continue;
            }
            if attacker_cover(el2) {
                settled.push(c2);
                i += 3;
                continue;
            }
        } else if at_target {
            if w2 + woods_total >= WOODS_BLOCK_THRESHOLD || w1 + woods_total >= WOODS_BLOCK_THRESHOLD {
                return Ok(Err(BLOCKED_BY_WOODS));
            }
            let target_cover = |el: i32| {
                el == eyes.target && eyes.attacker <= eyes.target && height(target) > 0
            };
            if target_cover(el1) {
                settled.push(c1);
                i += 3;
                continue;
            }
            if target_cover(el2) {
                settled.push(c2);
                i += 3;
                continue;
            }
        }

        if w2 > w1 {
            settled.push(c2);
            woods_total += w2;
        } else {
            settled.push(c1);
            woods_total += w1;
        }
        i += 3;
    }
    Ok(Ok(settled))
}

/// Walk the hexes between the two units, skipping their own hexes and
/// anything off the board
fn trace(
    game: &Game,
    attacker: &Entity,
    target: &Entity,
    eyes: &Eyes,
    line: &[Coords],
) -> Result<Sightline> {
    let (a, t) = (attacker.position, target.position);
    let mut effects = LosEffects::default();

    for &c in line {
        if c == a || c == t {
            continue;
        }
        let Some(hex) = game.board.hex(c) else {
            continue;
        };
        let floor = hex.floor();
        let near_attacker = a.distance(&c) <= 1;
        let near_target = t.distance(&c) <= 1;

        if eyes.obstructed(floor, near_attacker, near_target) {
            return Ok(Sightline::Blocked(BLOCKED_BY_TERRAIN));
        }

        let woods = hex.level_of(TerrainKind::Woods);
        if woods > 0 && eyes.obstructed(floor + WOODS_HEIGHT, near_attacker, near_target) {
            if woods == 1 {
                effects.light_woods += 1;
            } else {
                effects.heavy_woods += 1;
            }
        }

        if near_target && floor == eyes.target && eyes.attacker <= eyes.target && height(target) > 0 {
            effects.target_partial_cover = true;
        }
        if near_attacker
            && floor == eyes.attacker
            && eyes.attacker >= eyes.target
            && height(attacker) > 0
        {
            effects.attacker_partial_cover = true;
        }
    }

    if effects.woods_value() as i32 >= WOODS_BLOCK_THRESHOLD {
        return Ok(Sightline::Blocked(BLOCKED_BY_WOODS));
    }
    Ok(Sightline::Clear(effects))
}
