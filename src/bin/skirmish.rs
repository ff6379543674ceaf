//! Skirmish - a short scripted exchange on a demonstration board
//!
//! One unit walks up and fires everything it has, a second brawls with the
//! same target, a third charges it, and a shot at infantry holed up in a
//! building shows how much damage the walls soak up.

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use mech_rules::board::{Board, Coords, Terrain, TerrainKind};
use mech_rules::combat::{
    to_hit_charge, to_hit_kick, to_hit_punch, to_hit_weapon, Resolution, ToHitData,
};
use mech_rules::core::config::{config, set_config, EngineConfig};
use mech_rules::core::error::{EngineError, Result};
use mech_rules::core::types::{EntityId, Owner};
use mech_rules::damage::{charge_damage, kick_damage, missiles_hit, punch_damage, Dice};
use mech_rules::entity::{Entity, Limb, Location, Weapon, WeaponAttack, WeaponType};
use mech_rules::game::Game;
use mech_rules::movement::pathfinder::{charge_lazy, lazy};
use mech_rules::movement::{apply_path, compile, StepType};

const MIN_WIDTH: u32 = 9;
const MIN_HEIGHT: u32 = 10;

/// Weapons the striker turns on the mark; the last one is saved for the sentry
const MARK_BATTERY: usize = 4;
const SENTRY_WEAPON: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Skirmish - resolve one scripted exchange and print what happened
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Resolve a scripted exchange on a demonstration board")]
struct Args {
    /// Dice seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// TOML engine config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Serialize)]
struct MoveReport {
    unit: String,
    from: Coords,
    to: Coords,
    mp_used: u32,
    move_type: String,
}

#[derive(Debug, Serialize)]
struct AttackReport {
    attacker: String,
    target: String,
    attack: String,
    target_number: Option<i32>,
    resolution: Resolution,
    description: String,
    roll: Option<u32>,
    hit: bool,
    damage: u32,
}

#[derive(Debug, Serialize)]
struct StructureReport {
    building: String,
    hex: Coords,
    cf_before: u32,
    cf_after: u32,
    damage_in: u32,
    passed_through: u32,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    moves: Vec<MoveReport>,
    attacks: Vec<AttackReport>,
    structure: Option<StructureReport>,
}

struct Cast {
    striker: EntityId,
    brawler: EntityId,
    rammer: EntityId,
    mark: EntityId,
    sentry: EntityId,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut engine_config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        engine_config.seed = seed;
    }
    if set_config(engine_config).is_err() {
        tracing::warn!("Engine config was already set");
    }
    let config = config();

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    let mut dice = Dice::new(config.seed);
    let (mut game, cast) = setup(config)?;
    let mut report = Report {
        seed: config.seed,
        moves: Vec::new(),
        attacks: Vec::new(),
        structure: None,
    };

    advance(&mut game, &cast, &mut report)?;
    fire(&mut game, &cast, &mut dice, &mut report)?;
    brawl(&game, &cast, &mut dice, &mut report)?;
    charge(&game, &cast, &mut dice, &mut report)?;
    shoot_into_building(&mut game, &cast, &mut dice, &mut report)?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text(&report),
    }
    Ok(())
}

fn setup(config: &EngineConfig) -> Result<(Game, Cast)> {
    if config.board_width < MIN_WIDTH || config.board_height < MIN_HEIGHT {
        return Err(EngineError::InvalidArgument(format!(
            "the skirmish needs a board of at least {}x{} hexes",
            MIN_WIDTH, MIN_HEIGHT
        )));
    }

    let mut board = Board::new(config.board_width, config.board_height);
    board.set_terrain(Coords::new(3, 4), TerrainKind::Woods, 1);
    board.set_terrain(Coords::new(5, 5), TerrainKind::Woods, 2);
    board.set_terrain(Coords::new(1, 8), TerrainKind::Water, 2);
    board.set_elevation(Coords::new(6, 8), 1);
    board.add_terrain(Coords::new(7, 3), Terrain::with_exits(TerrainKind::Building, 2, 0b001000));
    board.add_terrain(Coords::new(7, 4), Terrain::with_exits(TerrainKind::Building, 2, 0b000001));

    let mut game = Game::new(board)?;
    let blue = Owner::new(1, 1);
    let red = Owner::new(2, 2);

    let striker = game.add_entity(
        Entity::biped_mech("Striker", blue, 55.0, 5, 0)
            .at(Coords::new(3, 9), 0)
            .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::CenterTorso))
            .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::LeftArm))
            .with_weapon(Weapon::new(WeaponType::srm6(), Location::LeftTorso).with_ammo(15))
            .with_weapon(Weapon::new(WeaponType::lrm10(), Location::RightTorso).with_ammo(12))
            .with_weapon(Weapon::new(WeaponType::medium_laser(), Location::RightArm)),
    );
    let brawler = game.add_entity(Entity::biped_mech("Brawler", blue, 70.0, 4, 0).at(Coords::new(2, 2), 2));
    let rammer = game.add_entity(Entity::biped_mech("Rammer", blue, 80.0, 4, 0).at(Coords::new(3, 0), 3));
    let mark = game.add_entity(Entity::biped_mech("Mark", red, 50.0, 4, 0).at(Coords::new(3, 2), 3));
    let sentry = game.add_entity(Entity::infantry("Sentry", red, 1).at(Coords::new(7, 4), 3));

    // The red side has already moved
    for id in [mark, sentry] {
        game.entity_mut(id)?.ready = false;
    }

    Ok((
        game,
        Cast {
            striker,
            brawler,
            rammer,
            mark,
            sentry,
        },
    ))
}

fn advance(game: &mut Game, cast: &Cast, report: &mut Report) -> Result<()> {
    let (from, facing) = {
        let striker = game.entity(cast.striker)?;
        (striker.position, striker.facing)
    };
    let mut path = lazy(from, facing, Coords::new(3, 6));
    compile(game, cast.striker, &mut path)?;
    apply_path(game, cast.striker, &path)?;

    let striker = game.entity(cast.striker)?;
    report.moves.push(MoveReport {
        unit: striker.name.clone(),
        from,
        to: striker.position,
        mp_used: striker.mp_used,
        move_type: format!("{:?}", striker.moved),
    });
    Ok(())
}

/// Roll against `data`. Returns the dice result, if any were rolled, and
/// whether the attack landed.
fn resolve(data: &ToHitData, dice: &mut Dice) -> (Option<u32>, bool) {
    match data.resolution() {
        Resolution::Roll => {
            let roll = dice.roll_2d6();
            let hit = data.target_number().is_some_and(|tn| roll as i32 >= tn);
            (Some(roll), hit)
        }
        Resolution::AutomaticSuccess => (None, true),
        Resolution::AutomaticFail | Resolution::Impossible => (None, false),
    }
}

fn record(
    game: &Game,
    attacker: EntityId,
    target: EntityId,
    attack: String,
    data: &ToHitData,
    outcome: (Option<u32>, bool),
    damage: u32,
) -> Result<AttackReport> {
    let (roll, hit) = outcome;
    Ok(AttackReport {
        attacker: game.entity(attacker)?.name.clone(),
        target: game.entity(target)?.name.clone(),
        attack,
        target_number: data.target_number(),
        resolution: data.resolution(),
        description: data.description(),
        roll,
        hit,
        damage: if hit { damage } else { 0 },
    })
}

/// Damage from one weapon that hit. Cluster weapons roll for how many
/// missiles landed.
fn weapon_damage(kind: &WeaponType, dice: &mut Dice) -> u32 {
    match kind.cluster_size {
        Some(missiles) => missiles_hit(missiles, dice) * kind.damage,
        None => kind.damage,
    }
}

fn fire(game: &mut Game, cast: &Cast, dice: &mut Dice, report: &mut Report) -> Result<()> {
    for index in 0..MARK_BATTERY {
        let attack = WeaponAttack {
            attacker: cast.striker,
            target: cast.mark,
            weapon: index,
        };
        let data = to_hit_weapon(game, &attack)?;
        let outcome = resolve(&data, dice);
        let kind = game.entity(cast.striker)?.weapons[index].kind.clone();
        let damage = if outcome.1 { weapon_damage(&kind, dice) } else { 0 };
        if data.is_roll() {
            game.declare_attack(attack)?;
        }
        report.attacks.push(record(
            game,
            cast.striker,
            cast.mark,
            kind.name,
            &data,
            outcome,
            damage,
        )?);
    }
    Ok(())
}

fn brawl(game: &Game, cast: &Cast, dice: &mut Dice, report: &mut Report) -> Result<()> {
    let brawler = game.entity(cast.brawler)?;

    let data = to_hit_punch(game, cast.brawler, cast.mark, Limb::Right)?;
    let outcome = resolve(&data, dice);
    let damage = punch_damage(brawler, Limb::Right);
    report.attacks.push(record(
        game,
        cast.brawler,
        cast.mark,
        "punch".to_string(),
        &data,
        outcome,
        damage,
    )?);

    let data = to_hit_kick(game, cast.brawler, cast.mark, Limb::Left)?;
    let outcome = resolve(&data, dice);
    let damage = kick_damage(brawler, Limb::Left);
    report.attacks.push(record(
        game,
        cast.brawler,
        cast.mark,
        "kick".to_string(),
        &data,
        outcome,
        damage,
    )?);
    Ok(())
}

fn charge(game: &Game, cast: &Cast, dice: &mut Dice, report: &mut Report) -> Result<()> {
    let rammer = game.entity(cast.rammer)?;
    let target = game.entity(cast.mark)?.position;
    let mut path = charge_lazy(rammer.position, rammer.facing, target);

    let data = to_hit_charge(game, cast.rammer, cast.mark, &path)?;
    compile(game, cast.rammer, &mut path)?;
    let hexes_moved = path
        .steps()
        .iter()
        .find(|s| s.step_type() == StepType::Charge)
        .map_or(0, |s| s.distance());

    let outcome = resolve(&data, dice);
    let damage = charge_damage(rammer, hexes_moved);
    report.attacks.push(record(
        game,
        cast.rammer,
        cast.mark,
        "charge".to_string(),
        &data,
        outcome,
        damage,
    )?);
    Ok(())
}

fn shoot_into_building(
    game: &mut Game,
    cast: &Cast,
    dice: &mut Dice,
    report: &mut Report,
) -> Result<()> {
    let attack = WeaponAttack {
        attacker: cast.striker,
        target: cast.sentry,
        weapon: SENTRY_WEAPON,
    };
    let data = to_hit_weapon(game, &attack)?;
    let outcome = resolve(&data, dice);
    let kind = game.entity(cast.striker)?.weapons[SENTRY_WEAPON].kind.clone();
    let damage = if outcome.1 { weapon_damage(&kind, dice) } else { 0 };

    let hex = game.entity(cast.sentry)?.position;
    let mut passed_through = damage;
    if damage > 0 {
        if let Some(building) = game.structure_at_mut(hex) {
            let cf_before = building.current_cf(hex)?;
            passed_through = building.absorb_damage(hex, damage)?;
            report.structure = Some(StructureReport {
                building: building.to_string(),
                hex,
                cf_before,
                cf_after: building.current_cf(hex)?,
                damage_in: damage,
                passed_through,
            });
        }
    }

    report.attacks.push(record(
        game,
        cast.striker,
        cast.sentry,
        format!("{} (into building)", kind.name),
        &data,
        outcome,
        passed_through,
    )?);
    Ok(())
}

fn print_text(report: &Report) {
    println!("=== SKIRMISH (seed {}) ===", report.seed);
    println!();
    for m in &report.moves {
        println!(
            "{} moved {} -> {} ({} MP, {})",
            m.unit, m.from, m.to, m.mp_used, m.move_type
        );
    }
    println!();
    for a in &report.attacks {
        let outcome = match (a.roll, a.hit) {
            (Some(roll), true) => format!("rolled {}, HIT for {}", roll, a.damage),
            (Some(roll), false) => format!("rolled {}, miss", roll),
            (None, true) => format!("automatic hit for {}", a.damage),
            (None, false) => "no roll".to_string(),
        };
        let number = a
            .target_number
            .map_or_else(|| format!("{:?}", a.resolution), |tn| format!("needs {}", tn));
        println!("{} -> {} [{}]: {}", a.attacker, a.target, a.attack, number);
        println!("    {}", a.description);
        println!("    {}", outcome);
    }
    if let Some(s) = &report.structure {
        println!();
        println!(
            "{} at {}: CF {} -> {}, {} of {} damage got through",
            s.building, s.hex, s.cf_before, s.cf_after, s.passed_through, s.damage_in
        );
    }
}
