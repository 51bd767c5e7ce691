/// Events emitted during a simulation step.
/// The outer loop consumes these for the modal beats (win pause,
/// death choreography).

use crate::domain::board::Pos;

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    FoodEaten { pos: Pos },
    AllFoodEaten,
    PlayerCaught,
}
