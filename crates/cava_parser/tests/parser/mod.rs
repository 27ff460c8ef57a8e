mod input_event;
mod placeholder;
mod round_trip;
