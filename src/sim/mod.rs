//! The simulation core: one deterministic, presentation-free step per frame.
//!
//! ┌──────────────────────── Frame Update Flow ─────────────────────────┐
//! │  engine::GameLoop ─► game::DesertRush::update ─► Session::step     │
//! │                                                                    │
//! │  Session::step:                                                    │
//! │    input snapshot ─► player controller                             │
//! │    collision pass ─► death flags / projectile resolution           │
//! │    motion models  ─► positions                                     │
//! │    clip selection ─► DrawCommands (level space)                    │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! Nothing in this module touches web-sys, so the whole loop runs under
//! plain `cargo test`.

pub mod enemy;
pub mod motion;
pub mod player;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use enemy::{Enemy, EnemyKind};
use player::Player;

// Level constants. The level is wider than the viewport; scrolling is the
// point of the game.
pub const LEVEL_WIDTH: i16 = 4098;
pub const LEVEL_HEIGHT: i16 = 700;
pub const GRAVITY: i16 = 3;
pub const VIEWPORT_WIDTH: i16 = 1000;
pub const VIEWPORT_HEIGHT: i16 = 700;
pub const GROUND_Y: i16 = 550;
pub const PLAYER_SPAWN: Point = Point { x: 200, y: 550 };

/// Nominal character size the camera centers on; unrelated to sprite boxes.
pub const CAMERA_SUBJECT: Size = Size { width: 20, height: 20 };
/// The camera leads the player so most of the screen shows what is ahead.
pub const CAMERA_LEAD: i16 = 300;

/// Frames the hurt animation gets to play before the session is lost.
pub const LOSS_DELAY_FRAMES: u8 = 45;

/// Top-level state machine. Win, Lose and Exit are terminal for a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    Win,
    Lose,
    Exit,
}

/// One frame's worth of input, already reduced to the keys the simulation
/// cares about. Built by the shell from the key-state query; absence of
/// input is simply an all-false snapshot.
#[derive(Debug, Copy, Clone, Default)]
pub struct InputSnapshot {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub power: bool,
}

/// Which sheet a draw command samples from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SheetId {
    Player,
    Dog,
    Mummy,
}

/// A sprite to draw this frame: a clip out of `sheet`, placed at a
/// level-space position. The renderer applies the camera transform.
#[derive(Debug, Copy, Clone)]
pub struct DrawCommand {
    pub sheet: SheetId,
    pub clip: Rect,
    pub position: Point,
}

/// One enemy placement, as an offset from the player spawn.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub dx: i16,
    pub dy: i16,
    pub kind: EnemyKind,
}

/// Enemy layout for a level. Loadable from `level.json`; the built-in
/// table is the shipped level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub enemies: Vec<EnemyPlacement>,
}

const fn placed(dx: i16, dy: i16, kind: EnemyKind) -> EnemyPlacement {
    EnemyPlacement { dx, dy, kind }
}

/// The eleven shipped enemies, offsets measured from the spawn point.
pub const ENEMY_PLACEMENTS: [EnemyPlacement; 11] = [
    placed(800, 60, EnemyKind::Dog),
    placed(1200, 60, EnemyKind::Dog),
    placed(1500, 50, EnemyKind::Mummy),
    placed(1900, 60, EnemyKind::Dog),
    placed(2300, 50, EnemyKind::Mummy),
    placed(2600, 60, EnemyKind::Dog),
    placed(3000, 50, EnemyKind::Mummy),
    placed(2800, 50, EnemyKind::Mummy),
    placed(3200, 60, EnemyKind::Dog),
    placed(3400, 50, EnemyKind::Mummy),
    placed(3600, 50, EnemyKind::Mummy),
];

impl Default for LevelLayout {
    fn default() -> Self {
        LevelLayout {
            enemies: ENEMY_PLACEMENTS.to_vec(),
        }
    }
}

/// Everything one play session owns: entities, camera, state machine.
/// There are no globals; single-writer semantics fall out of `&mut self`.
#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub camera: Rect,
    pub state: GameState,
    loss_timer: u8,
}

impl Session {
    pub fn new() -> Self {
        Self::with_layout(&LevelLayout::default())
    }

    pub fn with_layout(layout: &LevelLayout) -> Self {
        let enemies = layout
            .enemies
            .iter()
            .map(|p| {
                Enemy::new(
                    Point {
                        x: PLAYER_SPAWN.x + p.dx,
                        y: PLAYER_SPAWN.y + p.dy,
                    },
                    p.kind,
                )
            })
            .collect();
        Session {
            player: Player::new(),
            enemies,
            camera: Rect::from_parts(0, 0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            state: GameState::Menu,
            loss_timer: 0,
        }
    }

    /// Advance the simulation by one frame and emit this frame's sprites.
    ///
    /// Deliberate ordering: win check, collisions, loss timer, camera,
    /// enemies, then the player.
    pub fn step(&mut self, input: &InputSnapshot) -> Vec<DrawCommand> {
        if self.state != GameState::Playing {
            // menu/pause frames belong to the shell; terminal states stay put
            return Vec::new();
        }
        if self.player.at_right_edge() {
            self.state = GameState::Win;
            return Vec::new();
        }

        self.resolve_collisions();

        if self.player.is_dead() {
            self.loss_timer += 1;
            if self.loss_timer > LOSS_DELAY_FRAMES {
                self.state = GameState::Lose;
                return Vec::new();
            }
        }

        self.track_camera();

        // enemies step and emit before the player; canonical order
        let mut commands = Vec::with_capacity(self.enemies.len() + 2);
        for enemy in &mut self.enemies {
            enemy.step();
            commands.push(DrawCommand {
                sheet: match enemy.kind {
                    EnemyKind::Dog => SheetId::Dog,
                    EnemyKind::Mummy => SheetId::Mummy,
                },
                clip: enemy.sprite_clip(),
                position: enemy.body.position,
            });
        }

        self.player.handle_input(input);
        self.player.step();
        commands.push(DrawCommand {
            sheet: SheetId::Player,
            clip: self.player.clip,
            position: self.player.body.position,
        });
        if self.player.blast_in_flight {
            commands.push(DrawCommand {
                sheet: SheetId::Player,
                clip: self.player.blast_clip(),
                position: self.player.blast_position(),
            });
        }
        commands
    }

    /// Player-vs-enemy contact is lethal to the player; projectile-vs-enemy
    /// contact is lethal to the enemy and spends the projectile. Corpses
    /// take part in neither.
    fn resolve_collisions(&mut self) {
        let player_box = self.player.hit_box();
        let mut blast_box = self
            .player
            .blast_in_flight
            .then(|| self.player.blast_hit_box());

        for enemy in self.enemies.iter_mut().filter(|e| !e.is_dead()) {
            let enemy_box = enemy.hit_box();
            if player_box.intersects(&enemy_box) {
                self.player.kill();
            }
            if let Some(blast) = blast_box {
                if blast.intersects(&enemy_box) {
                    enemy.on_hit();
                    self.player.cancel_blast();
                    // one kill per projectile
                    blast_box = None;
                }
            }
        }
    }

    /// Center the camera on the player with a fixed forward lead, clamped
    /// so it never shows past the level bounds.
    fn track_camera(&mut self) {
        let subject = self.player.body.position;
        let x = (subject.x + CAMERA_SUBJECT.width / 2) - VIEWPORT_WIDTH / 2 + CAMERA_LEAD;
        let y = (subject.y + CAMERA_SUBJECT.height / 2) - VIEWPORT_HEIGHT / 2;
        self.camera.position.x = x.clamp(0, LEVEL_WIDTH - self.camera.size.width);
        self.camera.position.y = y.clamp(0, LEVEL_HEIGHT - self.camera.size.height);
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_session() -> Session {
        let mut session = Session::new();
        session.state = GameState::Playing;
        session
    }

    #[test]
    fn shipped_layout_has_eleven_enemies() {
        let session = Session::new();
        assert_eq!(session.enemies.len(), 11);
        assert_eq!(session.enemies[0].body.position, Point { x: 1000, y: 610 });
        assert_eq!(session.enemies[2].kind, EnemyKind::Mummy);
        assert_eq!(session.enemies[2].body.position, Point { x: 1700, y: 600 });
    }

    #[test]
    fn menu_and_pause_frames_do_not_simulate() {
        let mut session = Session::new();
        let x = session.player.body.position.x;
        assert!(session.step(&InputSnapshot::default()).is_empty());
        session.state = GameState::Paused;
        assert!(session.step(&InputSnapshot::default()).is_empty());
        assert_eq!(session.player.body.position.x, x);
    }

    #[test]
    fn right_edge_wins_on_the_next_step() {
        let mut session = playing_session();
        session.player.body.position.x = LEVEL_WIDTH - 150;
        session.step(&InputSnapshot::default());
        assert_eq!(session.state, GameState::Win);
    }

    #[test]
    fn camera_leads_and_clamps() {
        let mut session = playing_session();
        session.step(&InputSnapshot::default());
        // spawn is close to the left edge: lead would go positive
        assert_eq!(session.camera.position.x, 10);
        assert_eq!(session.camera.position.y, 0);

        session.player.body.position.x = LEVEL_WIDTH - 200;
        session.step(&InputSnapshot::default());
        assert_eq!(session.camera.position.x, LEVEL_WIDTH - VIEWPORT_WIDTH);
    }

    #[test]
    fn enemies_are_emitted_before_the_player() {
        let mut session = playing_session();
        let commands = session.step(&InputSnapshot::default());
        assert_eq!(commands.len(), 12);
        assert_ne!(commands[0].sheet, SheetId::Player);
        assert_eq!(commands[11].sheet, SheetId::Player);
    }

    #[test]
    fn contact_with_a_live_enemy_kills_the_player() {
        let mut session = playing_session();
        session.player.body.position = session.enemies[0].body.position;
        session.step(&InputSnapshot::default());
        assert!(session.player.is_dead());
        assert_eq!(session.state, GameState::Playing);
    }

    #[test]
    fn contact_with_a_corpse_is_harmless() {
        let mut session = playing_session();
        session.enemies[0].on_hit();
        session.player.body.position = session.enemies[0].body.position;
        session.step(&InputSnapshot::default());
        assert!(!session.player.is_dead());
    }

    #[test]
    fn lose_fires_on_frame_46_not_45() {
        let mut session = playing_session();
        session.player.kill();
        for frame in 1..=45 {
            session.step(&InputSnapshot::default());
            assert_eq!(session.state, GameState::Playing, "lost on frame {frame}");
        }
        session.step(&InputSnapshot::default());
        assert_eq!(session.state, GameState::Lose);
    }

    #[test]
    fn projectile_kills_an_enemy_and_is_spent() {
        let mut session = playing_session();
        session.player.blast_in_flight = true;
        // park the projectile on top of the first enemy
        session.player.blast_offset =
            session.enemies[0].body.position.x - session.player.body.position.x;
        session.player.body.position.y = session.enemies[0].body.position.y - 45;
        session.step(&InputSnapshot::default());
        assert!(session.enemies[0].is_dead());
        assert!(!session.player.blast_in_flight);
        assert_eq!(session.player.blast_offset, 0);
    }

    #[test]
    fn projectile_is_spent_on_the_first_enemy_it_hits() {
        // two co-located mummies; only one may die to a single projectile
        let layout = LevelLayout {
            enemies: vec![
                placed(800, 50, EnemyKind::Mummy),
                placed(800, 50, EnemyKind::Mummy),
            ],
        };
        let mut session = Session::with_layout(&layout);
        session.state = GameState::Playing;
        session.player.blast_in_flight = true;
        session.player.blast_offset = 800;
        session.player.body.position.y = session.enemies[0].body.position.y - 45;
        session.step(&InputSnapshot::default());
        assert!(session.enemies[0].is_dead());
        assert!(!session.enemies[1].is_dead());
        assert!(!session.player.blast_in_flight);
    }

    #[test]
    fn custom_layout_round_trips() {
        let layout = LevelLayout {
            enemies: vec![placed(500, 60, EnemyKind::Dog)],
        };
        let session = Session::with_layout(&layout);
        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.enemies[0].body.position.x, PLAYER_SPAWN.x + 500);
    }
}
