// End-to-end tests for the avatar relay HTTP API
//
// Every test boots the real router on an ephemeral port. The speech provider
// and the video provider are replaced by wiremock servers owned by the test,
// and generated audio lands in a per-test temporary directory, so tests run
// in parallel without sharing state.

mod test_audio;
mod test_generate;
mod test_tts;
