use std::fmt::Debug;
use std::hash::Hash;

use crate::Rewards;

/// A game position that tree search can plan over.
///
/// Positions are values: the search keys its statistics by the position
/// itself, so two positions reached through different move orders share one
/// entry (a transposition). This only works if `Eq` and `Hash` agree with
/// each other and with the logical position. A type whose equal positions
/// hash differently, or whose distinct positions compare equal, silently
/// corrupts the search; that is a contract violation, not a recoverable
/// error.
///
/// The state graph reachable from any position must be acyclic (every game
/// ends), otherwise selection may never reach a frontier.
pub trait GameState: Clone + Eq + Hash {
    /// A move (e.g. a board cell)
    type Action: Clone + Eq + Hash + Debug;

    /// Returns all legal actions, in a stable enumeration order.
    ///
    /// The search uses this order for every tie-break, so it must be
    /// deterministic for a given position.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action in place.
    ///
    /// The search only ever calls this on clones, never on a position it
    /// stores as a tree key. The action must be one of `legal_actions()`.
    fn apply(&mut self, action: &Self::Action);

    /// Returns true if the game has ended
    fn is_terminal(&self) -> bool;

    /// Per-player rewards, indexed by player. Only meaningful once terminal.
    fn rewards(&self) -> Rewards;

    /// Index of the player whose turn it is.
    ///
    /// Must stay defined for terminal positions: it names the player who
    /// would move next.
    fn current_player(&self) -> usize;
}
