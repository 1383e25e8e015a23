// Host-side tests for the railway agents: train, horn, sheep and sky.

use cardstack_core::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn slow_train_laps_in_about_833_frames() {
    let track = OvalTrack::default();
    let mut train = Train::new(3);
    let mut events = Vec::new();
    for _ in 0..833 {
        train.step(&track, &mut events);
    }
    assert!((train.progress() - 833.0 * TRAIN_SPEED_SLOW).abs() < 1e-3);
    assert_eq!(events, vec![TrainEvent::PassedStation]);

    train.step(&track, &mut events);
    assert!(train.progress() < 0.01, "wrapped to {}", train.progress());
}

#[test]
fn paused_train_does_not_move() {
    let track = OvalTrack::default();
    let mut train = Train::default();
    assert!(!train.toggle_running());
    let mut events = Vec::new();
    for _ in 0..100 {
        train.step(&track, &mut events);
    }
    assert_eq!(train.progress(), 0.0);
    assert!(events.is_empty());
}

#[test]
fn station_crossing_across_the_wrap() {
    let track = OvalTrack::default();
    let mut train = Train::new(0);
    train.set_speed_per_frame(0.6);
    train.set_progress(0.9);
    let mut events = Vec::new();
    // 0.9 -> 0.5 wraps over 0 and passes the station at 1/3
    train.step(&track, &mut events);
    assert_eq!(events.len(), 1);
}

#[test]
fn cars_trail_the_locomotive_in_order() {
    let track = OvalTrack::default();
    let mut train = Train::new(3);
    train.set_progress(0.5);
    let cars = train.cars(&track);
    assert_eq!(cars.len(), 4);
    assert!(cars[0].is_locomotive);
    assert_eq!(cars[0].color, LOCOMOTIVE_COLOR);
    assert_eq!(cars[1].color, WAGON_COLORS[0]);
    assert_eq!(cars[3].color, WAGON_COLORS[2]);

    let spacing = TRAIN_CAR_SPACING / track.perimeter();
    for (i, car) in cars.iter().enumerate() {
        assert!(!car.is_locomotive || i == 0);
        let expected = 0.5 - i as f32 * spacing;
        assert!((car.progress - expected).abs() < 1e-5, "car {i}");
    }
    for pair in cars.windows(2) {
        let gap = pair[0].point.position.distance(pair[1].point.position);
        assert!(gap <= TRAIN_CAR_SPACING + 1e-3);
        assert!(gap > TRAIN_CAR_SPACING * 0.8);
    }
}

#[test]
fn wagon_count_is_bounded() {
    let mut train = Train::new(100);
    assert_eq!(train.wagon_count(), TRAIN_MAX_WAGONS);
    assert!(!train.add_wagon());
    for _ in 0..TRAIN_MAX_WAGONS {
        assert!(train.remove_wagon());
    }
    assert!(!train.remove_wagon());
    assert_eq!(train.car_count(), 1);

    // colours pick up where they left off
    assert!(train.add_wagon());
    let cars = train.cars(&OvalTrack::default());
    assert_eq!(cars[1].color, WAGON_COLORS[0]);
}

#[test]
fn speed_toggle_and_override() {
    let mut train = Train::default();
    assert_eq!(train.toggle_speed(), TrainSpeed::Fast);
    assert_eq!(train.speed_per_frame(), TRAIN_SPEED_FAST);
    train.set_speed_per_frame(0.01);
    assert_eq!(train.speed_per_frame(), 0.01);
    train.set_speed(TrainSpeed::Slow);
    assert_eq!(train.speed_per_frame(), TRAIN_SPEED_SLOW);
}

#[test]
fn horn_respects_cooldown_and_toggle() {
    let mut horn = HornGate::default();
    assert!(horn.request(1.0));
    assert!(!horn.request(3.0));
    assert!(!horn.request(5.9));
    assert!(horn.request(6.0));

    assert!(!horn.toggle());
    assert!(!horn.request(100.0));
    assert!(horn.toggle());
    assert!(horn.request(100.0));
}

fn open_field(obstacle: Obstacle) -> Field {
    let mut field = Field::new(OvalTrack::default(), ObstacleList::new(vec![obstacle]));
    field.corridor_margin = 0.0;
    field
}

#[test]
fn sheep_never_enter_an_obstacle() {
    let rock = Obstacle::new(0.0, 0.0, 2.5);
    let field = open_field(rock);
    let mut rng = StdRng::seed_from_u64(11);

    // start a walker right beside the rock, aimed at it
    let walker = Sheep::new(Vec2::new(-3.0, 0.0), 0.0, 0.05, 0.0);
    let mut flock = Flock::new(vec![walker]);
    for frame in 0..6000 {
        flock.step(frame as f32 / 60.0, &field, &mut rng);
        for s in flock.sheep() {
            assert!(!rock.contains(s.position), "inside at frame {frame}: {:?}", s.position);
            assert!(s.position.x.abs() <= field.limit && s.position.y.abs() <= field.limit);
        }
    }
}

#[test]
fn spawned_flock_starts_on_free_ground() {
    let track = OvalTrack::default();
    let field = Field::new(track, ObstacleList::farm(&track));
    let mut rng = StdRng::seed_from_u64(4);
    let flock = Flock::spawn(SHEEP_COUNT, &field, &mut rng);
    assert!(!flock.is_empty());
    assert!(flock.len() <= SHEEP_COUNT);
    for (i, s) in flock.sheep().iter().enumerate() {
        assert!(!field.is_blocked(s.position), "sheep {i} spawned on blocked ground");
        for other in &flock.sheep()[i + 1..] {
            assert!(s.position.distance(other.position) >= SHEEP_MIN_SEPARATION);
        }
    }
}

#[test]
fn farm_flock_keeps_off_the_track() {
    let track = OvalTrack::default();
    let field = Field::new(track, ObstacleList::farm(&track));
    let mut rng = StdRng::seed_from_u64(99);
    let mut flock = Flock::spawn(SHEEP_COUNT, &field, &mut rng);
    for frame in 0..3000 {
        flock.step(frame as f32 / 60.0, &field, &mut rng);
    }
    for s in flock.sheep() {
        assert!(!field.is_blocked(s.position), "{:?}", s.position);
    }
}

#[test]
fn farm_obstacles_include_the_station() {
    let track = OvalTrack::default();
    let obstacles = ObstacleList::farm(&track);
    let station = track.station_position();
    assert!(obstacles.contains(Vec2::new(station.x, station.z)));
    assert!(!Obstacle::new(0.0, 0.0, 1.0).contains(Vec2::new(1.0, 0.0)), "rim is free");
}

#[test]
fn sky_keeps_one_vehicle_within_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut sky = Sky::new(&mut rng);
    let mut replaced = 0;
    for frame in 0..5000 {
        if sky.step(frame as f32 / 60.0, &mut rng) {
            replaced += 1;
        }
        let p = sky.vehicle().position;
        let horizontal = Vec2::new(p.x, p.z).length();
        assert!(horizontal <= SKY_DESPAWN_DIST + 1e-3, "frame {frame}");
        assert!(p.y > 10.0);
    }
    assert!(replaced > 0, "a vehicle should have crossed the sky");
}

#[test]
fn smoke_puffs_expire() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut smoke = Smoke::default();
    for _ in 0..300 {
        smoke.step(Some(Vec3::new(0.0, 3.5, 0.0)), &mut rng);
        for p in smoke.puffs() {
            assert!(p.life < p.max_life);
            assert!(p.opacity() > 0.0 && p.opacity() <= 0.5);
        }
    }
    assert!(!smoke.puffs().is_empty());
    for _ in 0..100 {
        smoke.step(None, &mut rng);
    }
    assert!(smoke.puffs().is_empty());
}

#[test]
fn clouds_wrap_at_the_edge() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut clouds = Clouds::new(CLOUD_COUNT, &mut rng);
    assert_eq!(clouds.clouds().len(), CLOUD_COUNT);
    for _ in 0..20_000 {
        clouds.step();
    }
    for c in clouds.clouds() {
        assert!(c.position.x >= -CLOUD_WRAP_X && c.position.x <= CLOUD_WRAP_X);
    }
}
