use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robot_fight::attack::Arsenal;
use robot_fight::{Arena, EndReason, Facing, Gene, Genome, Match, MatchStatus, Robot, RobotId};

fn genome(overrides: &[(Gene, i32)]) -> Genome {
    overrides
        .iter()
        .fold(Genome::sentry(), |g, &(gene, value)| g.with(gene, value).unwrap())
}

fn against_sentry(attacker: Genome) -> Match {
    let attacker = Robot::new(RobotId(1), attacker);
    let defender = Robot::defender(Genome::sentry(), Facing::Left);
    Match::new(attacker, defender, Arena::default()).unwrap()
}

#[test]
fn idle_attacker_times_out() {
    let mut fight = against_sentry(Genome::sentry());
    let arena = *fight.arena();

    assert_eq!(fight.run(), MatchStatus::Finished(EndReason::Timeout));
    assert_eq!(fight.elapsed(), arena.max_ticks());
    assert_eq!(fight.attacker().match_duration(), arena.max_ticks());
    assert_eq!(fight.attacker().fitness(), 0);
    assert_eq!(fight.attacker().hp(), 40);
    assert_eq!(fight.defender().hp(), 40);
}

#[test]
fn ranged_hit_scores_on_the_same_tick() {
    let all_shoot: Vec<(Gene, i32)> = [
        Gene::ActionOne,
        Gene::ActionTwo,
        Gene::ActionThree,
        Gene::ActionFour,
        Gene::ActionFive,
        Gene::ActionSix,
    ]
    .into_iter()
    .map(|gene| (gene, 1))
    .chain([(Gene::ArmOne, 1)])
    .collect();
    let mut fight = against_sentry(genome(&all_shoot));
    let ticks_per_phase = fight.arena().ticks_per_phase();

    while fight.defender().hp() == 40 {
        assert_eq!(fight.tick(), MatchStatus::Running);
        assert_eq!(fight.attacker().fitness(), 0);
    }
    assert!(fight.elapsed() > ticks_per_phase);
    assert_eq!(fight.defender().hp(), 30);
    assert_eq!(fight.attacker().fitness(), 10);

    // one shot per phase, four hits to bring the sentry down
    assert_eq!(fight.run(), MatchStatus::Finished(EndReason::DefenderDefeated));
    assert_eq!(fight.attacker().fitness(), 40);
    assert_eq!(fight.attacker().hp(), 40);
    // defender is restored once the match is over
    assert_eq!(fight.defender().hp(), 40);
}

#[test]
fn jump_launches_and_lands() {
    let arena = Arena::default();
    let jumper = genome(&[(Gene::JumpOne, 1), (Gene::JumpTwo, 1), (Gene::JumpThree, 1)]);
    let mut robot = Robot::new(RobotId(1), jumper);
    robot.reset(&arena);

    let mut direct = robot.clone();
    direct.jump();
    assert_eq!(direct.velocity_y(), -10.0 * 50.0 / 20.0);
    assert!(!direct.on_floor(&arena));

    let mut arsenal = Arsenal::default();
    for _ in 0..arena.ticks_per_phase() {
        robot.update(&arena, &mut arsenal);
    }
    assert!(!robot.on_floor(&arena));
    assert_eq!(robot.velocity_y(), -10.0 * 50.0 / 20.0 + 1.0);

    for _ in 0..arena.ticks_per_phase() - 1 {
        robot.update(&arena, &mut arsenal);
    }
    assert!(robot.on_floor(&arena));
    assert_eq!(robot.velocity_y(), 0.0);
    assert_eq!(robot.body().max.y, arena.floor_y());
}

#[test]
fn first_jump_gene_fires_in_phase_three() {
    let arena = Arena::default();
    let mut robot = Robot::new(RobotId(1), genome(&[(Gene::JumpOne, 1)]));
    robot.reset(&arena);
    let mut arsenal = Arsenal::default();

    for _ in 0..3 * arena.ticks_per_phase() - 1 {
        robot.update(&arena, &mut arsenal);
        assert!(robot.on_floor(&arena));
    }
    robot.update(&arena, &mut arsenal);
    assert_eq!(robot.phase(), 3);
    assert!(!robot.on_floor(&arena));
    assert_eq!(robot.velocity_y(), -10.0 * 50.0 / 20.0 + 1.0);
}

#[test]
fn runaway_attacker_goes_out_of_bounds() {
    let runner = genome(&[(Gene::MoveOne, 10), (Gene::MoveTwo, 10), (Gene::MoveThree, 10)]);
    let mut fight = against_sentry(runner);
    let limit = fight.arena().oob_limit();

    let mut first_outside = None;
    while fight.tick() == MatchStatus::Running {
        if first_outside.is_none() && fight.attacker().oob_ticks() == 1 {
            first_outside = Some(fight.elapsed());
        }
    }

    let first_outside = first_outside.unwrap();
    assert_eq!(fight.end_reason(), Some(EndReason::OutOfBounds));
    assert_eq!(fight.elapsed(), first_outside + limit - 1);
    assert_eq!(fight.attacker().oob_ticks(), limit);
    assert_eq!(fight.attacker().fitness(), 0);
}

#[test]
fn fitness_moves_only_by_damage() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for i in 0..40 {
        let attacker = Robot::new(RobotId(i + 1), Genome::random(&mut rng));
        let defender = Robot::defender(Genome::random(&mut rng), Facing::Left);
        let mut fight = Match::new(attacker, defender, Arena::default()).unwrap();

        loop {
            let fitness = fight.attacker().fitness();
            let attacker_hp = fight.attacker().hp();
            let defender_hp = fight.defender().hp();
            let status = fight.tick();

            assert_eq!(fight.defender().fitness(), 0);
            if status != MatchStatus::Running {
                break;
            }
            let dealt = defender_hp - fight.defender().hp();
            let taken = attacker_hp - fight.attacker().hp();
            assert_eq!(fight.attacker().fitness() - fitness, dealt - taken);
        }
        assert!(fight.elapsed() <= fight.arena().max_ticks());
    }
}
