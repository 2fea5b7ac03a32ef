//! Test module organization for the bounded queue
