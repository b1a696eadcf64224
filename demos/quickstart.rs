use chronoframe::{
    telemetry, ChronoframeResult, ManualScheduler, NavigationChange, NavigationState,
    PlaybackController, TickOutcome, Timespan,
};
use qtty::Seconds;

fn main() -> ChronoframeResult<()> {
    let _ = telemetry::init_default_tracing();

    let timespan = Timespan::parse("month", "2019-01", "2020-12")?;
    println!("{} ({} frames)", timespan.period(), timespan.frame_count());

    let mut navigation = NavigationState::new(timespan);
    navigation.subscribe(Box::new(move |change: NavigationChange| {
        if let NavigationChange::DisplayedDate(date) = change {
            println!("  slider -> {}", date.format(timespan.precision()));
        }
    }));
    navigation.commit_text("2020-06")?;
    let june = navigation.displayed_date();
    navigation.set_committed_range(timespan.start(), june);
    navigation.commit_text("2020-03")?;

    let mut playback = PlaybackController::new(navigation, ManualScheduler::new());
    playback.play();
    for outcome in playback.advance(Seconds::new(5.0)) {
        if outcome == TickOutcome::Stopped {
            println!("stopped at {}", playback.navigation().formatted_date());
        }
    }

    Ok(())
}
