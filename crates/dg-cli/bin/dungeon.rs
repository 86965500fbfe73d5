//! Dungeon level generator CLI.
//!
//! Generates one level and prints it as an ASCII map, optionally writing
//! the serialized snapshot to a file.

use std::fs;
use std::io::{self, Write};

use clap::{Parser, ValueEnum};

use dg_core::dungeon::{
    save, Branch, Coordinate, GenerationConfig, LevelId, LevelModel, LevelTheme, MemoryCellStore,
    Terrain,
};
use dg_core::dungeon::populate::{RecordingLootFactory, RecordingSpawner};
use dg_core::dungeon::strategy::generate_random_level;
use dg_core::{GenRng, LEVEL_HEIGHT, LEVEL_WIDTH};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Catacombs,
    Caverns,
    Sunken,
}

impl From<ThemeArg> for LevelTheme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Catacombs => LevelTheme::Catacombs,
            ThemeArg::Caverns => LevelTheme::Caverns,
            ThemeArg::Sunken => LevelTheme::Sunken,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BranchArg {
    Main,
    Caves,
    Sunken,
}

impl From<BranchArg> for Branch {
    fn from(value: BranchArg) -> Self {
        match value {
            BranchArg::Main => Branch::Main,
            BranchArg::Caves => Branch::Caves,
            BranchArg::Sunken => Branch::Sunken,
        }
    }
}

/// Generate and display a dungeon level
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(author, version, about = "Dungeon level generator", long_about = None)]
struct Args {
    /// Generation seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Force a theme instead of the weighted pick
    #[arg(short = 't', long = "theme")]
    theme: Option<ThemeArg>,

    /// Dungeon branch
    #[arg(short = 'b', long = "branch", default_value = "main")]
    branch: BranchArg,

    /// Level number within the branch
    #[arg(short = 'd', long = "depth", default_value_t = 1)]
    depth: u8,

    /// Skip monster placement
    #[arg(long = "no-monsters")]
    no_monsters: bool,

    /// Write the level snapshot as JSON to this path
    #[arg(short = 'o', long = "snapshot")]
    snapshot: Option<String>,

    /// Print placement details after the map
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn render_map<W: Write>(
    out: &mut W,
    level: &LevelModel,
    store: &MemoryCellStore,
) -> io::Result<()> {
    for y in 0..LEVEL_HEIGHT as i32 {
        let mut line = String::with_capacity(LEVEL_WIDTH);
        for x in 0..LEVEL_WIDTH as i32 {
            let symbol = level
                .terrain_at(store, Coordinate::new(x, y))
                .map_or(' ', |t| t.symbol());
            line.push(symbol);
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let id = LevelId::new(args.branch.into(), args.depth);
    let config = GenerationConfig {
        generate_stairs_down: !id.is_deepest(),
        theme_override: args.theme.map(LevelTheme::from),
        no_monsters: args.no_monsters,
    };

    let mut rng = match args.seed {
        Some(seed) => GenRng::new(seed),
        None => GenRng::from_entropy(),
    };
    let seed = rng.seed();

    let mut store = MemoryCellStore::new();
    let mut level = LevelModel::new(id, Terrain::RockWall);
    let mut spawner = RecordingSpawner::default();
    let mut loot = RecordingLootFactory::default();

    let theme = generate_random_level(
        &mut level,
        &mut store,
        &mut spawner,
        &mut loot,
        &mut rng,
        &config,
    )
    .map_err(|e| io::Error::other(e.to_string()))?;

    let mut stdout = io::stdout().lock();
    render_map(&mut stdout, &level, &store)?;
    writeln!(stdout, "{}, {:?}, seed {}", id, theme, seed)?;

    if args.verbose {
        writeln!(stdout, "rooms: {}", level.rooms.len())?;
        writeln!(stdout, "connections: {}", level.connections.len())?;
        if let Some(up) = level.stairs_up {
            writeln!(stdout, "stairs up: {}", up)?;
        }
        if let Some(down) = level.stairs_down {
            writeln!(stdout, "stairs down: {}", down)?;
        }
        writeln!(stdout, "monsters: {}", spawner.spawned.len())?;
        writeln!(stdout, "loot: {}", loot.created.len())?;
    }

    if let Some(path) = args.snapshot {
        let snap = save::snapshot(&level, &store);
        let json = serde_json::to_string_pretty(&snap)
            .map_err(|e| io::Error::other(e.to_string()))?;
        fs::write(&path, json)?;
        writeln!(stdout, "snapshot written to {}", path)?;
    }

    Ok(())
}
