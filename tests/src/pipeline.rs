mod exhaustion;
mod round_trip;
mod rotation;
