//! End-to-end tests of the time-budgeted agent.
//!
//! - A one-move game must be solved as soon as every move has been tried
//! - On 3×3 tic-tac-toe the agent never loses to a random opponent and
//!   never plays into an immediate loss when a safe move exists
//! - A search never overruns its budget by more than one playout

use ox_core::{GameState, Rewards};
use ox_mcts::{
    games::{Board, Cell},
    Agent, MctsConfig, RolloutEvaluator,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

type BoardAgent = Agent<Board, RolloutEvaluator<ChaCha8Rng>, ChaCha8Rng>;

/// Create an agent with the given seed.
fn create_agent(seed: u64) -> BoardAgent {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    Agent::new(MctsConfig::default(), evaluator, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

/// Whether the side to move in `board` can win on the spot.
fn has_immediate_win(board: &Board) -> bool {
    board.legal_actions().iter().any(|cell| {
        let mut next = board.clone();
        next.apply(cell);
        next.winner().is_some()
    })
}

/// A move is safe if it ends the game or leaves the opponent no winning reply.
fn is_safe(board: &Board, cell: Cell) -> bool {
    let mut next = board.clone();
    next.apply(&cell);
    next.is_terminal() || !has_immediate_win(&next)
}

// One decision: the root mover picks between a winning and a losing terminal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum OneMove {
    Root { winning_first: bool },
    Done { mover_won: bool },
}

impl GameState for OneMove {
    type Action = &'static str;

    fn legal_actions(&self) -> Vec<&'static str> {
        match self {
            OneMove::Root { winning_first: true } => vec!["win", "lose"],
            OneMove::Root { winning_first: false } => vec!["lose", "win"],
            OneMove::Done { .. } => Vec::new(),
        }
    }

    fn apply(&mut self, action: &&'static str) {
        *self = OneMove::Done {
            mover_won: *action == "win",
        };
    }

    fn is_terminal(&self) -> bool {
        matches!(self, OneMove::Done { .. })
    }

    fn rewards(&self) -> Rewards {
        match self {
            OneMove::Done { mover_won: true } => Rewards::win(0, 2),
            OneMove::Done { mover_won: false } => Rewards::win(1, 2),
            OneMove::Root { .. } => Rewards::zeros(2),
        }
    }

    fn current_player(&self) -> usize {
        match self {
            OneMove::Root { .. } => 0,
            OneMove::Done { .. } => 1,
        }
    }
}

#[test]
fn test_one_move_game_picks_the_win() {
    for winning_first in [true, false] {
        let root = OneMove::Root { winning_first };
        // One playout expands the root, one per action tries each move
        let warmup = root.legal_actions().len() + 1;

        for playouts in warmup..40 {
            let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(playouts as u64));
            let mut agent: Agent<OneMove, _, _> =
                Agent::new(MctsConfig::default(), evaluator, ChaCha8Rng::seed_from_u64(0)).unwrap();

            let action = agent.choose_action_with_playouts(&root, playouts).unwrap();
            assert_eq!(action, "win", "{} playouts, winning_first={}", playouts, winning_first);
        }
    }
}

/// The agent never loses at tic-tac-toe as X against a random opponent.
#[test]
fn test_mcts_never_loses_as_x() {
    for seed in 0..20 {
        let mut agent = create_agent(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 1000);
        let mut board = Board::tic_tac_toe();

        while !board.is_terminal() {
            let cell = if board.current_player() == 0 {
                agent.choose_action_with_playouts(&board, 2000).unwrap()
            } else {
                *board.legal_actions().choose(&mut rng).unwrap()
            };
            board.play(cell).unwrap();
        }

        assert_ne!(
            board.rewards().get(0),
            Rewards::LOSS,
            "MCTS (X) lost game with seed {}. Final state:\n{}",
            seed,
            board
        );
    }
}

/// The agent never loses as O (second player) against a random opponent.
#[test]
fn test_mcts_never_loses_as_o() {
    for seed in 0..20 {
        let mut agent = create_agent(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 2000);
        let mut board = Board::tic_tac_toe();

        while !board.is_terminal() {
            let cell = if board.current_player() == 1 {
                agent.choose_action_with_playouts(&board, 2000).unwrap()
            } else {
                *board.legal_actions().choose(&mut rng).unwrap()
            };
            board.play(cell).unwrap();
        }

        assert_ne!(
            board.rewards().get(1),
            Rewards::LOSS,
            "MCTS (O) lost game with seed {}. Final state:\n{}",
            seed,
            board
        );
    }
}

/// In self-play neither side walks into an immediate loss when it has a safe move.
#[test]
fn test_self_play_avoids_immediate_losses() {
    for seed in 0..10 {
        let mut agents = [create_agent(seed), create_agent(seed + 500)];
        let mut board = Board::tic_tac_toe();

        while !board.is_terminal() {
            let player = board.current_player();
            let cell = agents[player]
                .choose_action_with_playouts(&board, 2000)
                .unwrap();

            let safe_exists = board.legal_actions().into_iter().any(|c| is_safe(&board, c));
            if safe_exists {
                assert!(
                    is_safe(&board, cell),
                    "seed {}: player {} played {} into an immediate loss from\n{}",
                    seed,
                    player,
                    cell,
                    board
                );
            }

            board.play(cell).unwrap();
        }
    }
}

/// Two agents searching the 3×3 game draw.
#[test]
fn test_self_play_draws() {
    let mut agents = [create_agent(7), create_agent(8)];
    let mut board = Board::tic_tac_toe();

    while !board.is_terminal() {
        let player = board.current_player();
        let cell = agents[player]
            .choose_action_with_playouts(&board, 5000)
            .unwrap();
        board.play(cell).unwrap();
    }

    assert_eq!(board.winner(), None, "self-play ended with a winner:\n{}", board);
}

/// The agent takes a win that is available right now.
#[test]
fn test_takes_immediate_win() {
    let mut board = Board::tic_tac_toe();
    // X X .
    // O O .
    // . . .
    for cell in [0, 3, 1, 4] {
        board.play(Cell::from_index(cell, 3)).unwrap();
    }

    let mut agent = create_agent(3);
    let cell = agent.choose_action_with_playouts(&board, 500).unwrap();
    assert_eq!(cell, Cell::new(0, 2));
}

// A wide, shallow game: every position has many moves, so each playout
// pays for a large expansion.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Wide {
    depth: u8,
    trail: u64,
}

const WIDE_ACTIONS: u32 = 2000;
const WIDE_DEPTH: u8 = 4;

impl GameState for Wide {
    type Action = u32;

    fn legal_actions(&self) -> Vec<u32> {
        if self.is_terminal() {
            Vec::new()
        } else {
            (0..WIDE_ACTIONS).collect()
        }
    }

    fn apply(&mut self, action: &u32) {
        self.trail = self
            .trail
            .wrapping_mul(WIDE_ACTIONS as u64 + 1)
            .wrapping_add(*action as u64);
        self.depth += 1;
    }

    fn is_terminal(&self) -> bool {
        self.depth >= WIDE_DEPTH
    }

    fn rewards(&self) -> Rewards {
        Rewards::win((self.trail % 2) as usize, 2)
    }

    fn current_player(&self) -> usize {
        (self.depth % 2) as usize
    }
}

#[test]
fn test_budget_respected() {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(1));
    let mut agent: Agent<Wide, _, _> =
        Agent::new(MctsConfig::default(), evaluator, ChaCha8Rng::seed_from_u64(2)).unwrap();
    let root = Wide { depth: 0, trail: 0 };

    for budget_ms in [0u64, 20, 100] {
        let budget = Duration::from_millis(budget_ms);
        let start = Instant::now();
        let action = agent.choose_action(&root, budget).unwrap();
        let elapsed = start.elapsed();

        assert!(action < WIDE_ACTIONS);
        assert!(
            elapsed < budget + Duration::from_millis(250),
            "budget {:?} overran: {:?}",
            budget,
            elapsed
        );
    }
}
