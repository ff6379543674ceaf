//! To-hit for weapon fire

use crate::board::{arc_contains, target_side_table, Arc, SideTable, TerrainKind};
use crate::combat::los::{sightline, Sightline};
use crate::combat::modifiers::{attacker_movement, attacker_terrain, target_movement_of, target_terrain};
use crate::combat::to_hit::{HitTable, ToHitData};
use crate::core::constants::{
    LONG_RANGE_MODIFIER, MEDIUM_RANGE_MODIFIER, PARTIAL_COVER_MODIFIER, TARGET_IMMOBILE_MODIFIER,
};
use crate::core::error::{EngineError, Result};
use crate::entity::{
    height, is_secondary_arc_weapon, weapon_arc, AmmoKind, Entity, Location, MechSystem, Weapon,
    WeaponAttack,
};
use crate::game::Game;

fn gated(attacker: &Entity, data: ToHitData) -> Result<ToHitData> {
    tracing::debug!("{} cannot fire: {}", attacker.name, data.description());
    Ok(data)
}

/// To-hit number for `attack`, taking the attacks already declared this
/// phase into account
pub fn to_hit_weapon(game: &Game, attack: &WeaponAttack) -> Result<ToHitData> {
    let ae = game.entity(attack.attacker)?;
    let te = game.entity(attack.target)?;
    let weapon = ae.weapons.get(attack.weapon).ok_or_else(|| {
        EngineError::InvalidArgument(format!("{} has no weapon #{}", ae.name, attack.weapon))
    })?;
    let wtype = &weapon.kind;

    // Infantry weapons never run dry
    let infantry = ae.class.is_infantry();
    let uses_ammo = wtype.uses_ammo() && !infantry;

    if weapon.destroyed {
        return gated(ae, ToHitData::impossible("Weapon not operational"));
    }
    if uses_ammo && weapon.shots_left() == 0 {
        return gated(ae, ToHitData::impossible("Weapon out of ammo"));
    }
    let sensor_hits = ae.destroyed_criticals(MechSystem::Sensors, Location::Head);
    if sensor_hits > 1 {
        return gated(ae, ToHitData::impossible("Attacker sensors destroyed"));
    }

    let facing = if is_secondary_arc_weapon(ae, weapon) {
        ae.secondary_facing
    } else {
        ae.facing
    };
    if !arc_contains(ae.position, facing, te.position, weapon_arc(ae, weapon)) {
        return gated(ae, ToHitData::impossible("Target not in arc"));
    }

    let mut los = match sightline(game, ae, te)? {
        Sightline::Clear(effects) => effects,
        Sightline::Blocked(reason) => return gated(ae, ToHitData::impossible(reason)),
    };
    if los.attacker_partial_cover && weapon.location.is_leg() {
        return gated(ae, ToHitData::impossible("Nearby terrain blocks leg weapons"));
    }

    let mut to_hit = ToHitData::base(ae.crew.gunnery, "gunnery skill");

    let range = ae.position.distance(&te.position);
    if range > wtype.long_range {
        return gated(ae, ToHitData::automatic_fail("Target out of range"));
    }
    if range > wtype.medium_range {
        to_hit.add_modifier(LONG_RANGE_MODIFIER, "long range");
    } else if range > wtype.short_range {
        to_hit.add_modifier(MEDIUM_RANGE_MODIFIER, "medium range");
    } else if infantry && range == 0 {
        if wtype.flamer {
            to_hit.add_modifier(-1, "infantry flamer assault");
        } else if wtype.ammo == Some(AmmoKind::Srm) {
            to_hit.add_modifier(-1, "infantry SRM assault");
        } else {
            to_hit.add_modifier(-2, "infantry assault");
        }
    } else if range <= wtype.minimum_range {
        let penalty = (wtype.minimum_range - range + 1) as i32;
        to_hit.add_modifier(penalty, "minimum range");
    }

    // Infantry shrug off their own movement
    if !infantry {
        to_hit.append(attacker_movement(ae.moved));
    }
    to_hit.append(target_movement_of(te));
    to_hit.append(attacker_terrain(game, ae)?);

    let att_el = game.abs_height_of(ae)?;
    let targ_el = game.abs_height_of(te)?;
    let att_hex = game.board.require_hex(ae.position)?;
    if att_hex.contains(TerrainKind::Water) && att_hex.surface() > att_el {
        return gated(ae, ToHitData::impossible("Attacker underwater"));
    }

    to_hit.append(target_terrain(game, te)?);

    let targ_hex = game.board.require_hex(te.position)?;
    if targ_hex.contains(TerrainKind::Water) {
        if targ_hex.surface() == targ_el && height(te) > 0 {
            los.target_partial_cover = true;
        } else if targ_hex.surface() > targ_el {
            return gated(ae, ToHitData::impossible("Target underwater"));
        }
    }

    if los.light_woods > 0 {
        to_hit.add_modifier(
            los.light_woods as i32,
            format!("{} light woods intervening", los.light_woods),
        );
    }
    if los.heavy_woods > 0 {
        to_hit.add_modifier(
            los.heavy_woods as i32 * 2,
            format!("{} heavy woods intervening", los.heavy_woods),
        );
    }

    if los.target_partial_cover {
        to_hit.add_modifier(PARTIAL_COVER_MODIFIER, "target has partial cover");
        to_hit.set_hit_table(HitTable::Punch);
    }

    let prior = prior_attacks(game, attack);
    if let Some(modifier) = secondary_target_modifier(game, ae, te, &prior)? {
        to_hit.add_modifier(modifier, "secondary target modifier");
    }

    if ae.heat_firing_modifier != 0 {
        to_hit.add_modifier(ae.heat_firing_modifier, "heat");
    }

    if ae.destroyed_criticals(MechSystem::Shoulder, weapon.location) > 0 {
        to_hit.add_modifier(4, "shoulder actuator destroyed");
    } else {
        let actuator_hits = [MechSystem::UpperArm, MechSystem::LowerArm]
            .into_iter()
            .filter(|&system| ae.destroyed_criticals(system, weapon.location) > 0)
            .count() as i32;
        if actuator_hits > 0 {
            to_hit.add_modifier(actuator_hits, format!("{} destroyed arm actuators", actuator_hits));
        }
    }

    if sensor_hits > 0 {
        to_hit.add_modifier(2, "attacker sensors damaged");
    }

    if te.immobile {
        to_hit.add_modifier(TARGET_IMMOBILE_MODIFIER, "target immobile");
    }

    if ae.prone {
        if let Err(reason) = prone_attacker(ae, weapon, &prior) {
            return gated(ae, ToHitData::impossible(reason));
        }
        // A quad with every leg intact fires normally
        if !ae.class.is_quad() || ae.count_destroyed_legs() > 0 {
            to_hit.add_modifier(2, "attacker prone");
        }
    }

    if te.prone {
        if range == 1 {
            to_hit.add_modifier(-2, "target prone and adjacent");
        } else if range > 1 {
            to_hit.add_modifier(1, "target prone and at range");
        }
    }

    if wtype.to_hit_modifier != 0 {
        to_hit.add_modifier(wtype.to_hit_modifier, "weapon to-hit modifier");
    }
    if let Some(bin) = weapon.ammo.filter(|_| uses_ammo) {
        if bin.to_hit_modifier != 0 {
            to_hit.add_modifier(bin.to_hit_modifier, "ammunition to-hit modifier");
        }
    }

    // Infantry swarming their target's hex strike its front
    if infantry && range == 0 {
        to_hit.set_side_table(SideTable::Front);
    } else {
        to_hit.set_side_table(target_side_table(
            ae.position,
            te.position,
            te.facing,
            te.class.is_vehicle(),
        ));
    }

    Ok(to_hit)
}

/// Attacks this attacker declared before `attack`. If `attack` has not been
/// declared yet, every attack it has declared.
fn prior_attacks<'a>(game: &'a Game, attack: &WeaponAttack) -> Vec<&'a WeaponAttack> {
    game.attacks_by(attack.attacker)
        .take_while(|prior| prior.weapon != attack.weapon)
        .collect()
}

/// The primary target is the first one fired on in the forward arc. If
/// none was, and this target is not in the forward arc either, the first
/// target fired on.
fn secondary_target_modifier(
    game: &Game,
    ae: &Entity,
    te: &Entity,
    prior: &[&WeaponAttack],
) -> Result<Option<i32>> {
    let in_front = |entity: &Entity| {
        arc_contains(ae.position, ae.secondary_facing, entity.position, Arc::Forward)
    };
    let current_in_front = in_front(te);

    let mut primary = None;
    for attack in prior {
        let previous_target = game.entity(attack.target)?;
        if in_front(previous_target) {
            primary = Some(previous_target.id);
            break;
        }
        if primary.is_none() && !current_in_front {
            primary = Some(previous_target.id);
        }
    }

    Ok(match primary {
        Some(id) if id != te.id => Some(if current_in_front { 1 } else { 2 }),
        _ => None,
    })
}

/// Which weapons a prone mech can still bring to bear
fn prone_attacker(
    ae: &Entity,
    weapon: &Weapon,
    prior: &[&WeaponAttack],
) -> std::result::Result<(), &'static str> {
    let fired_other_arm = |arm: Location| -> bool {
        let Some(other) = arm.other_arm() else {
            return false;
        };
        prior
            .iter()
            .filter_map(|attack| ae.weapons.get(attack.weapon))
            .any(|w| w.location == other)
    };

    if ae.class.is_quad() {
        let legs_dead = ae.count_destroyed_legs();
        if legs_dead >= 3 {
            return Err("Prone with three or more legs destroyed");
        }
        if legs_dead == 0 {
            return Ok(());
        }
        if ae.is_location_destroyed(Location::RightArm) && ae.is_location_destroyed(Location::LeftArm) {
            return Err("Prone with both front legs destroyed");
        }
        if weapon.location.is_arm() && fired_other_arm(weapon.location) {
            return Err("Prone and firing from other front leg already");
        }
        if weapon.location.is_leg() {
            return Err("Can't fire rear leg-mounted weapons while prone with destroyed legs");
        }
        return Ok(());
    }

    if ae.is_location_destroyed(Location::RightArm) || ae.is_location_destroyed(Location::LeftArm) {
        return Err("Prone with one or both arms destroyed");
    }
    if weapon.location.is_arm() && fired_other_arm(weapon.location) {
        return Err("Prone and firing from other arm already");
    }
    if weapon.location.is_leg() {
        return Err("Can't fire leg-mounted weapons while prone");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coords};
    use crate::combat::to_hit::Resolution;
    use crate::core::types::{EntityId, Owner};
    use crate::entity::{MoveType, MovementMode, WeaponType};

    /// Shooter at (3,1) facing south, target due south of it
    fn range_duel(range: i32) -> (Game, EntityId, EntityId) {
        let mut game = Game::new(Board::new(8, 16)).unwrap();
        let shooter = game.add_entity(
            Entity::biped_mech("Shooter", Owner::new(1, 1), 50.0, 4, 0)
                .at(Coords::new(3, 1), 3)
                .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::CenterTorso))
                .with_weapon(Weapon::new(WeaponType::ac10(), Location::RightTorso).with_ammo(10))
                .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::LeftArm))
                .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::RightArm))
                .with_weapon(Weapon::new(WeaponType::small_laser(), Location::LeftLeg)),
        );
        let target = game.add_entity(
            Entity::biped_mech("Mark", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(3, 1 + range), 0),
        );
        (game, shooter, target)
    }

    fn fire(game: &Game, attacker: EntityId, target: EntityId, weapon: usize) -> ToHitData {
        to_hit_weapon(game, &WeaponAttack { attacker, target, weapon }).unwrap()
    }

    fn has(data: &ToHitData, description: &str) -> Option<i32> {
        data.modifiers()
            .iter()
            .find(|m| m.description == description)
            .map(|m| m.value)
    }

    #[test]
    fn test_range_brackets() {
        let (game, a, t) = range_duel(2);
        let data = fire(&game, a, t, 0);
        assert_eq!(data.target_number(), Some(4));
        assert_eq!(data.side_table(), SideTable::Front);

        let (game, a, t) = range_duel(5);
        assert_eq!(has(&fire(&game, a, t, 0), "medium range"), Some(2));

        let (game, a, t) = range_duel(7);
        let data = fire(&game, a, t, 0);
        assert_eq!(has(&data, "long range"), Some(4));
        assert_eq!(has(&data, "medium range"), None);

        let (game, a, t) = range_duel(10);
        assert_eq!(fire(&game, a, t, 0).resolution(), Resolution::AutomaticFail);
    }

    #[test]
    fn test_target_prone() {
        let (mut game, a, t) = range_duel(1);
        game.entity_mut(t).unwrap().prone = true;
        assert_eq!(has(&fire(&game, a, t, 0), "target prone and adjacent"), Some(-2));

        let (mut game, a, t) = range_duel(3);
        game.entity_mut(t).unwrap().prone = true;
        assert_eq!(has(&fire(&game, a, t, 0), "target prone and at range"), Some(1));
    }

    #[test]
    fn test_gating() {
        let (mut game, a, t) = range_duel(3);
        game.entity_mut(a).unwrap().weapons[0].destroyed = true;
        assert_eq!(fire(&game, a, t, 0).description(), "Weapon not operational");

        game.entity_mut(a).unwrap().weapons[1].ammo = None;
        assert_eq!(fire(&game, a, t, 1).description(), "Weapon out of ammo");

        let shooter = game.entity_mut(a).unwrap();
        shooter.hit_system(MechSystem::Sensors, Location::Head);
        assert_eq!(has(&fire(&game, a, t, 2), "attacker sensors damaged"), Some(2));
        game.entity_mut(a).unwrap().hit_system(MechSystem::Sensors, Location::Head);
        assert_eq!(fire(&game, a, t, 2).description(), "Attacker sensors destroyed");

        assert!(matches!(
            to_hit_weapon(&game, &WeaponAttack { attacker: a, target: t, weapon: 9 }),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_out_of_arc() {
        let (mut game, a, t) = range_duel(3);
        game.entity_mut(a).unwrap().secondary_facing = 0;
        game.entity_mut(a).unwrap().facing = 0;
        let data = fire(&game, a, t, 0);
        assert_eq!(data.description(), "Target not in arc");
    }

    #[test]
    fn test_movement_and_actuators() {
        let (mut game, a, t) = range_duel(3);
        {
            let shooter = game.entity_mut(a).unwrap();
            shooter.moved = MoveType::Run;
            shooter.hit_system(MechSystem::UpperArm, Location::LeftArm);
            shooter.hit_system(MechSystem::LowerArm, Location::LeftArm);
            shooter.heat_firing_modifier = 1;
        }
        {
            let mark = game.entity_mut(t).unwrap();
            mark.delta_distance = 5;
            mark.moved = MoveType::Jump;
            mark.immobile = true;
        }
        let data = fire(&game, a, t, 2);
        assert_eq!(has(&data, "attacker ran"), Some(2));
        assert_eq!(has(&data, "target moved 5-6 hexes"), Some(2));
        assert_eq!(has(&data, "target jumped"), Some(1));
        assert_eq!(has(&data, "heat"), Some(1));
        assert_eq!(has(&data, "2 destroyed arm actuators"), Some(2));
        assert_eq!(has(&data, "target immobile"), Some(-4));

        game.entity_mut(a).unwrap().hit_system(MechSystem::Shoulder, Location::LeftArm);
        let data = fire(&game, a, t, 2);
        assert_eq!(has(&data, "shoulder actuator destroyed"), Some(4));
        assert_eq!(has(&data, "2 destroyed arm actuators"), None);
    }

    #[test]
    fn test_secondary_target() {
        let (mut game, a, t) = range_duel(3);
        let other = game.add_entity(
            Entity::biped_mech("Other", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(3, 5), 0),
        );
        game.declare_attack(WeaponAttack { attacker: a, target: t, weapon: 0 }).unwrap();
        let data = fire(&game, a, other, 2);
        assert_eq!(has(&data, "secondary target modifier"), Some(1));
        // Same target again is no penalty
        assert_eq!(has(&fire(&game, a, t, 2), "secondary target modifier"), None);
    }

    #[test]
    fn test_prone_attacker() {
        let (mut game, a, t) = range_duel(3);
        game.entity_mut(a).unwrap().prone = true;
        assert_eq!(has(&fire(&game, a, t, 0), "attacker prone"), Some(2));
        assert_eq!(
            fire(&game, a, t, 4).description(),
            "Can't fire leg-mounted weapons while prone"
        );

        game.declare_attack(WeaponAttack { attacker: a, target: t, weapon: 2 }).unwrap();
        assert_eq!(
            fire(&game, a, t, 3).description(),
            "Prone and firing from other arm already"
        );

        game.entity_mut(a).unwrap().destroy_location(Location::LeftArm);
        assert_eq!(
            fire(&game, a, t, 0).description(),
            "Prone with one or both arms destroyed"
        );
    }

    #[test]
    fn test_water() {
        let (mut game, a, t) = range_duel(1);
        game.board.set_terrain(Coords::new(3, 2), TerrainKind::Water, 1);
        let data = fire(&game, a, t, 0);
        assert_eq!(has(&data, "target has partial cover"), Some(3));
        assert_eq!(has(&data, "target in water"), Some(-1));
        assert_eq!(data.hit_table(), HitTable::Punch);

        game.board.set_terrain(Coords::new(3, 2), TerrainKind::Water, 2);
        assert_eq!(fire(&game, a, t, 0).description(), "Target underwater");

        let (mut game, a, t) = range_duel(1);
        game.board.set_terrain(Coords::new(3, 1), TerrainKind::Water, 2);
        assert_eq!(fire(&game, a, t, 0).description(), "Attacker underwater");
    }

    #[test]
    fn test_infantry_assault() {
        let mut game = Game::new(Board::new(6, 6)).unwrap();
        let mark = game.add_entity(
            Entity::tank("Mark", Owner::new(2, 2), 40.0, MovementMode::Tracked, 4).at(Coords::new(2, 2), 0),
        );
        let squad = game.add_entity(
            Entity::infantry("Squad", Owner::new(1, 1), 1)
                .at(Coords::new(2, 2), 0)
                .with_weapon(Weapon::new(WeaponType::machine_gun(), Location::Body))
                .with_weapon(Weapon::new(WeaponType::flamer(), Location::Body)),
        );
        game.entity_mut(squad).unwrap().moved = MoveType::Walk;
        let data = fire(&game, squad, mark, 0);
        assert_eq!(has(&data, "infantry assault"), Some(-2));
        assert_eq!(has(&data, "attacker walked"), None);
        assert_eq!(data.side_table(), SideTable::Front);
        assert_eq!(has(&fire(&game, squad, mark, 1), "infantry flamer assault"), Some(-1));
    }

    #[test]
    fn test_minimum_range() {
        let (mut game, a, t) = range_duel(2);
        game.entity_mut(a)
            .unwrap()
            .weapons
            .push(Weapon::new(WeaponType::ppc(), Location::CenterTorso));
        assert_eq!(has(&fire(&game, a, t, 5), "minimum range"), Some(2));
    }
}
