/// Everything the event loop reacts to. Feed, countdown and user input all
/// push onto the same channel so session state is only touched in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Feed sends a new price for the tracked symbol
    Price { price: f64 },

    // Countdown tick (every second) for one session
    Tick { session: u64 },

    // User pressed "start"
    Start,

    // Outer app changed the current turn (None = no reporting)
    Turn { turn: Option<u64> },

    // Ctrl+C, "quit" or stdin closed
    Shutdown,
}
