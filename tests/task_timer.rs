use mockall::mock;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use tasktimer_tui::effects::{Burst, ParticleEffect, Silent, SoundEffect};
use tasktimer_tui::state::{
    format_elapsed, ColorAssigner, ColorPair, DeferredAction, ManualTicker, Numerals, Palette,
    RandomSource, TaskLog, TaskRecord, TaskTimer, TimerState,
};
use tasktimer_tui::store::{FileStore, KeyValueStore, MemoryStore};

mock! {
    pub Sound {}
    impl SoundEffect for Sound {
        fn play(&mut self, resource: &str);
    }
}

mock! {
    pub Particles {}
    impl ParticleEffect for Particles {
        fn burst(&mut self, burst: Burst);
        fn reset(&mut self);
    }
}

/// Returns the queued indices in order, then repeats the last one.
struct Script(Vec<usize>);

impl RandomSource for Script {
    fn pick_index(&mut self, _len: usize) -> usize {
        if self.0.len() > 1 {
            self.0.remove(0)
        } else {
            self.0[0]
        }
    }
}

struct NullParticles;

impl ParticleEffect for NullParticles {
    fn burst(&mut self, _burst: Burst) {}
    fn reset(&mut self) {}
}

fn timer_with(picks: Vec<usize>) -> TaskTimer {
    TaskTimer::new(
        ColorAssigner::new(Palette::extended(), Box::new(Script(picks))),
        Box::new(ManualTicker::new()),
        Box::new(Silent),
        Box::new(NullParticles),
    )
}

#[fixture]
fn timer() -> TaskTimer {
    timer_with(vec![0])
}

#[rstest]
#[case("")]
#[case("x")]
#[case("xy")]
fn short_titles_never_start(mut timer: TaskTimer, #[case] title: &str) {
    timer.set_title(title);
    assert!(!timer.start());
    timer.tick();
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.elapsed(), 0);
}

#[rstest]
#[case(1)]
#[case(59)]
#[case(3661)]
fn n_ticks_become_time_taken(mut timer: TaskTimer, #[case] n: u64) {
    timer.set_title("focus block");
    assert!(timer.start());
    for _ in 0..n {
        timer.tick();
    }
    assert_eq!(timer.elapsed(), n);

    let report = timer.stop().unwrap();
    assert_eq!(report.record.time_taken(), n);
    assert_eq!(timer.elapsed(), 0);
    assert_eq!(timer.log().records().last(), Some(&report.record));
}

#[test]
fn stop_when_idle_touches_nothing() {
    let mut sound = MockSound::new();
    sound.expect_play().never();
    let mut particles = MockParticles::new();
    particles.expect_burst().never();
    particles.expect_reset().never();

    let mut timer = TaskTimer::new(
        ColorAssigner::new(Palette::basic(), Box::new(Script(vec![0]))),
        Box::new(ManualTicker::new()),
        Box::new(sound),
        Box::new(particles),
    );

    assert!(timer.stop().is_none());
    assert_eq!(timer.state(), TimerState::Idle);
    assert!(timer.log().is_empty());
    assert_eq!(timer.generation(), 0);
}

#[rstest]
fn second_stop_records_nothing(mut timer: TaskTimer) {
    timer.set_title("done");
    timer.start();

    assert!(timer.stop().is_some());
    assert!(timer.stop().is_none());
    assert_eq!(timer.log().len(), 1);
}

#[test]
fn stop_fires_sound_and_confetti_once() {
    let mut sound = MockSound::new();
    sound.expect_play().times(1).return_const(());
    let mut particles = MockParticles::new();
    particles
        .expect_burst()
        .withf(|b| *b == Burst::default())
        .times(1)
        .return_const(());
    particles.expect_reset().times(1).return_const(());

    let mut timer = TaskTimer::new(
        ColorAssigner::new(Palette::basic(), Box::new(Script(vec![3]))),
        Box::new(ManualTicker::new()),
        Box::new(sound),
        Box::new(particles),
    );
    timer.set_title("celebrate");
    timer.start();
    let report = timer.stop().unwrap();
    for deferred in report.deferred {
        timer.run_deferred(deferred.action);
    }
}

#[rstest]
#[case(0, "slate")]
#[case(12, "teal")]
#[case(22, "gold")]
#[case(33, "tan")]
fn injected_index_selects_palette_entry(#[case] index: usize, #[case] name: &str) {
    let palette = Palette::extended();
    let (_, expected) = palette.get(index).map(|(n, p)| (n.to_string(), p.clone())).unwrap();
    let mut colors = ColorAssigner::new(palette, Box::new(Script(vec![index])));

    let (picked, pair) = colors.pick_random();
    assert_eq!(picked, name);
    assert_eq!(pair, &expected);
}

#[test]
fn record_is_stamped_before_next_color_is_drawn() {
    // slate first, then gold for the next idle gradient
    let mut timer = timer_with(vec![0, 22]);
    let stamped = timer.idle_gradient().clone();

    timer.set_title("stamp");
    timer.start();
    let report = timer.stop().unwrap();
    assert_eq!(report.record.colors(), &stamped);

    let advance = report
        .deferred
        .iter()
        .find(|d| matches!(d.action, DeferredAction::AdvanceColor { .. }))
        .unwrap();
    timer.run_deferred(advance.action);
    assert_eq!(timer.idle_color_name(), "gold");
    assert_eq!(timer.idle_gradient(), &ColorPair::new("#FFD700", "#B8860B"));
}

#[test]
fn second_stop_before_delay_skips_stale_color_advance() {
    let mut timer = timer_with(vec![0, 1, 2]);

    timer.set_title("one");
    timer.start();
    let first = timer.stop().unwrap();
    timer.set_title("two");
    timer.start();
    let second = timer.stop().unwrap();

    let stale = first.deferred[0].action;
    let fresh = second.deferred[0].action;
    assert!(!timer.run_deferred(stale));
    assert_eq!(timer.idle_color_name(), "slate");
    assert!(timer.run_deferred(fresh));
    assert_eq!(timer.idle_color_name(), "gray");
}

#[rstest]
#[case(0, Numerals::Western, "00:00")]
#[case(61, Numerals::Western, "01:01")]
#[case(3661, Numerals::Western, "61:01")]
#[case(61, Numerals::EasternArabic, "٠١:٠١")]
fn formats_elapsed(#[case] seconds: u64, #[case] numerals: Numerals, #[case] expected: &str) {
    assert_eq!(format_elapsed(seconds, numerals), expected);
}

#[test]
fn log_round_trips_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());

    let mut log = TaskLog::new();
    log.append(TaskRecord::new("first", 10, ColorPair::new("#CBD5E1", "#1E293B")).unwrap());
    log.append(TaskRecord::new("second", 70, ColorPair::new("#FFD700", "#B8860B")).unwrap());
    log.save(&mut store).unwrap();

    assert_eq!(TaskLog::load(&FileStore::new(dir.path())), log);
}

#[test]
fn load_from_fresh_store_is_empty() {
    assert!(TaskLog::load(&MemoryStore::new()).is_empty());

    let dir = tempfile::tempdir().unwrap();
    assert!(TaskLog::load(&FileStore::new(dir.path().join("missing"))).is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set("tasks", "{not json".to_string()).unwrap();
    assert!(TaskLog::load(&store).is_empty());
}

#[test]
fn timer_resumes_persisted_log() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = timer().with_store(Box::new(FileStore::new(dir.path())));
    first.set_title("morning");
    first.start();
    first.tick();
    first.stop();
    drop(first);

    let second = timer().with_store(Box::new(FileStore::new(dir.path())));
    assert_eq!(second.log().len(), 1);
    assert_eq!(second.log().records()[0].title(), "morning");
    assert_eq!(second.log().records()[0].time_taken(), 1);
}
