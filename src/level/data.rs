//! Level domain: built-in level layouts.

use bevy::prelude::*;

/// Names of every built-in layout.
pub const LEVEL_NAMES: [&str; 2] = ["main", "bonus"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Walkable floors, platforms and ceilings
    Ground,
    /// Vertical surfaces for clinging and wall jumps
    Wall,
}

#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub kind: BlockKind,
    pub center: Vec2,
    pub size: Vec2,
}

impl Block {
    fn ground(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: BlockKind::Ground,
            center: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: BlockKind::Wall,
            center: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalPlacement {
    pub position: Vec2,
    pub target: &'static str,
}

#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub name: &'static str,
    pub player_spawn: Vec2,
    /// Falling below this height kills the player.
    pub kill_y: f32,
    pub blocks: Vec<Block>,
    pub coins: Vec<Vec2>,
    pub bulls: Vec<Vec2>,
    pub snails: Vec<Vec2>,
    pub portals: Vec<PortalPlacement>,
}

pub fn layout(name: &str) -> Option<LevelLayout> {
    match name {
        "main" => Some(main_level()),
        "bonus" => Some(bonus_level()),
        _ => None,
    }
}

fn main_level() -> LevelLayout {
    LevelLayout {
        name: "main",
        player_spawn: Vec2::new(-1050.0, -140.0),
        kill_y: -700.0,
        blocks: vec![
            // Floor with a pit on the right
            Block::ground(-500.0, -200.0, 1480.0, 40.0),
            Block::ground(900.0, -200.0, 600.0, 40.0),
            // Outer walls
            Block::wall(-1220.0, 180.0, 40.0, 800.0),
            Block::wall(1220.0, 180.0, 40.0, 800.0),
            // Crawlspace: too low to stand under
            Block::ground(-750.0, -140.0, 300.0, 24.0),
            // Platforms
            Block::ground(-300.0, -60.0, 240.0, 24.0),
            Block::ground(100.0, 40.0, 200.0, 24.0),
            Block::ground(450.0, 140.0, 160.0, 24.0),
            // Wall-jump shaft over the pit
            Block::wall(300.0, -20.0, 40.0, 320.0),
            Block::wall(560.0, 60.0, 40.0, 480.0),
        ],
        coins: vec![
            Vec2::new(-750.0, -165.0),
            Vec2::new(-300.0, -20.0),
            Vec2::new(100.0, 80.0),
            Vec2::new(450.0, 180.0),
            Vec2::new(430.0, 0.0),
            Vec2::new(1000.0, -150.0),
        ],
        bulls: vec![Vec2::new(850.0, -160.0)],
        snails: vec![Vec2::new(-350.0, -170.0)],
        portals: vec![PortalPlacement {
            position: Vec2::new(1150.0, -140.0),
            target: "bonus",
        }],
    }
}

fn bonus_level() -> LevelLayout {
    let mut coins = Vec::new();
    for i in 0..8 {
        coins.push(Vec2::new(-280.0 + i as f32 * 80.0, -150.0));
    }
    for i in 0..4 {
        coins.push(Vec2::new(-120.0 + i as f32 * 80.0, 10.0));
    }

    LevelLayout {
        name: "bonus",
        player_spawn: Vec2::new(-360.0, -140.0),
        kill_y: -600.0,
        blocks: vec![
            Block::ground(0.0, -200.0, 880.0, 40.0),
            Block::wall(-460.0, 40.0, 40.0, 520.0),
            Block::wall(460.0, 40.0, 40.0, 520.0),
            Block::ground(0.0, -40.0, 360.0, 24.0),
        ],
        coins,
        bulls: Vec::new(),
        snails: vec![Vec2::new(0.0, -170.0)],
        portals: vec![PortalPlacement {
            position: Vec2::new(400.0, -140.0),
            target: "main",
        }],
    }
}
