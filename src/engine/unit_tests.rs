#[cfg(test)]
mod tests {
    use crate::{
        common::{AccessKind, FrameIndex, PageNumber, ProcessId},
        config::{ConfigError, PolicyKind, SimConfig},
        engine::{Event, InvariantViolation, SimError, Simulator},
        memory::Occupant,
        policy::{Candidate, CustomPolicy, ReplacementPolicy},
    };

    const PAGE: usize = 4096;

    fn four_frames() -> Simulator {
        Simulator::new(SimConfig::new(PAGE, 4 * PAGE)).unwrap()
    }

    fn read(sim: &mut Simulator, pid: ProcessId, va: usize) -> usize {
        sim.translate(pid, va, AccessKind::Read).unwrap()
    }

    #[test]
    fn construction_rejects_bad_capacity() {
        assert!(matches!(
            Simulator::new(SimConfig::new(0, 16384)),
            Err(SimError::Config(ConfigError::ZeroPageSize))
        ));
        assert!(matches!(
            Simulator::new(SimConfig::new(4096, 100)),
            Err(SimError::Config(ConfigError::MemorySmallerThanPage { .. }))
        ));
        assert!(matches!(
            Simulator::new(SimConfig::default().with_policy(PolicyKind::Custom)),
            Err(SimError::Config(ConfigError::CustomPolicyNeedsStrategy))
        ));
    }

    #[test]
    fn process_ids_are_sequential() {
        let mut sim = four_frames();
        assert_eq!(sim.create_process(100), ProcessId(0));
        assert_eq!(sim.create_process(100), ProcessId(1));
        assert_eq!(sim.create_process(100), ProcessId(2));
        assert_eq!(sim.processes().len(), 3);
    }

    #[test]
    fn decompose_splits_page_and_offset() {
        let sim = four_frames();
        assert_eq!(sim.decompose(0), (PageNumber(0), 0));
        assert_eq!(sim.decompose(4095), (PageNumber(0), 4095));
        assert_eq!(sim.decompose(4096 * 3 + 17), (PageNumber(3), 17));
    }

    #[test]
    fn first_touch_faults_and_loads_lowest_free_frame() {
        let mut sim = four_frames();
        let pid = sim.create_process(4 * PAGE);

        let pa = read(&mut sim, pid, 2 * PAGE + 10);

        assert_eq!(pa, 10);
        assert_eq!(sim.page_faults(), 1);
        assert_eq!(sim.total_accesses(), 1);
        assert_eq!(sim.current_time(), 1);

        let page = sim.page(pid, PageNumber(2)).unwrap();
        assert!(page.is_present());
        assert_eq!(page.frame(), Some(FrameIndex(0)));
        assert_eq!(page.load_time, 0);
        assert_eq!(page.last_access, 0);
    }

    #[test]
    fn hit_reuses_frame_without_fault() {
        let mut sim = four_frames();
        let pid = sim.create_process(4 * PAGE);

        let first = read(&mut sim, pid, 123);
        let second = read(&mut sim, pid, 123);

        assert_eq!(first, second);
        assert_eq!(sim.page_faults(), 1);
        assert_eq!(sim.total_accesses(), 2);
        assert_eq!(sim.page(pid, PageNumber(0)).unwrap().last_access, 1);
        assert_eq!(sim.page(pid, PageNumber(0)).unwrap().load_time, 0);
    }

    #[test]
    fn record_access_sets_bits_by_kind() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);

        sim.translate(pid, 0, AccessKind::Read).unwrap();
        let page = sim.page(pid, PageNumber(0)).unwrap();
        assert!(page.referenced);
        assert!(!page.modified);

        sim.translate(pid, 8, AccessKind::Write).unwrap();
        let page = sim.page(pid, PageNumber(0)).unwrap();
        assert!(page.referenced);
        assert!(page.modified);
        assert_eq!(page.last_access, 1);
    }

    #[test]
    fn unknown_process_is_rejected_without_counting() {
        let mut sim = four_frames();
        let err = sim.translate(ProcessId(9), 0, AccessKind::Read).unwrap_err();

        assert_eq!(err, SimError::UnknownProcess { pid: ProcessId(9) });
        assert_eq!(sim.total_accesses(), 0);
        assert_eq!(sim.current_time(), 0);
    }

    #[test]
    fn page_beyond_table_is_rejected() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);

        let err = sim.translate(pid, 2 * PAGE, AccessKind::Read).unwrap_err();
        assert_eq!(
            err,
            SimError::PageOutOfRange {
                pid,
                page: PageNumber(2),
                num_pages: 2
            }
        );
        assert!(
            sim.record_access(pid, PageNumber(5), AccessKind::Write)
                .is_err()
        );
    }

    #[test]
    fn fifo_evicts_oldest_load_when_full() {
        let mut sim = four_frames();
        let a = sim.create_process(4 * PAGE);
        let b = sim.create_process(4 * PAGE);

        for page in 0..4 {
            read(&mut sim, a, page * PAGE);
        }
        // Touch page 0 again: FIFO must not care.
        read(&mut sim, a, 0);

        let pa = read(&mut sim, b, 5);

        assert_eq!(pa, 5);
        assert!(!sim.page(a, PageNumber(0)).unwrap().is_present());
        assert_eq!(sim.page(a, PageNumber(0)).unwrap().frame(), None);
        assert_eq!(sim.page(b, PageNumber(0)).unwrap().frame(), Some(FrameIndex(0)));
        assert_eq!(sim.memory().frame(FrameIndex(0)).unwrap().load_time, 5);
        assert!(sim.check_invariants().is_ok());
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let config = SimConfig::new(PAGE, 2 * PAGE).with_policy(PolicyKind::Lru);
        let mut sim = Simulator::new(config).unwrap();
        let pid = sim.create_process(3 * PAGE);

        read(&mut sim, pid, 0); // frame 0
        read(&mut sim, pid, PAGE); // frame 1
        read(&mut sim, pid, 0); // page 0 now most recent
        read(&mut sim, pid, 2 * PAGE);

        assert!(sim.page(pid, PageNumber(0)).unwrap().is_present());
        assert!(!sim.page(pid, PageNumber(1)).unwrap().is_present());
        assert_eq!(sim.page(pid, PageNumber(2)).unwrap().frame(), Some(FrameIndex(1)));
    }

    #[test]
    fn clock_clears_reference_bits_in_page_table() {
        let config = SimConfig::new(PAGE, 2 * PAGE).with_policy(PolicyKind::Clock);
        let mut sim = Simulator::new(config).unwrap();
        let pid = sim.create_process(3 * PAGE);

        read(&mut sim, pid, 0);
        read(&mut sim, pid, PAGE);
        // Both referenced: the hand sweeps once, clearing both, then takes frame 0.
        read(&mut sim, pid, 2 * PAGE);

        assert!(!sim.page(pid, PageNumber(0)).unwrap().is_present());
        let survivor = sim.page(pid, PageNumber(1)).unwrap();
        assert!(survivor.is_present());
        assert!(!survivor.referenced);
        assert!(sim.page(pid, PageNumber(2)).unwrap().referenced);
    }

    #[test]
    fn random_policy_is_reproducible() {
        fn run(seed: u64) -> Vec<Option<FrameIndex>> {
            let config = SimConfig::new(PAGE, 3 * PAGE)
                .with_policy(PolicyKind::Random)
                .with_seed(seed);
            let mut sim = Simulator::new(config).unwrap();
            let pid = sim.create_process(8 * PAGE);
            for i in 0..40 {
                sim.translate(pid, (i * 5 % 8) * PAGE, AccessKind::Read)
                    .unwrap();
            }
            (0..8)
                .map(|p| sim.page(pid, PageNumber(p)).unwrap().frame())
                .collect()
        }

        assert_eq!(run(11), run(11));
    }

    #[test]
    fn fault_emits_evict_then_load_events() {
        let config = SimConfig::new(PAGE, PAGE);
        let mut sim = Simulator::new(config).unwrap();
        let pid = sim.create_process(2 * PAGE);

        read(&mut sim, pid, 0);
        sim.take_events();
        read(&mut sim, pid, PAGE);

        let events = sim.take_events();
        assert_eq!(
            events,
            vec![
                Event::PageFault {
                    time: 1,
                    pid,
                    page: PageNumber(1)
                },
                Event::Evicted {
                    time: 1,
                    frame: FrameIndex(0),
                    victim: Occupant::new(pid, PageNumber(0)),
                    policy: "FIFO",
                },
                Event::Loaded {
                    time: 1,
                    frame: FrameIndex(0),
                    occupant: Occupant::new(pid, PageNumber(1)),
                },
                Event::Accessed {
                    time: 1,
                    pid,
                    address: PAGE,
                    page: PageNumber(1),
                    frame: FrameIndex(0),
                    physical: 0,
                    kind: AccessKind::Read,
                },
            ]
        );
        assert!(sim.events().is_empty());
    }

    #[test]
    fn custom_policy_is_injected() {
        let policy = CustomPolicy::new(|frames: &[Candidate]| frames[frames.len() - 1].frame);
        let mut sim =
            Simulator::with_policy(SimConfig::new(PAGE, 2 * PAGE), Box::new(policy)).unwrap();
        let pid = sim.create_process(3 * PAGE);

        read(&mut sim, pid, 0);
        read(&mut sim, pid, PAGE);
        read(&mut sim, pid, 2 * PAGE);

        assert_eq!(sim.policy_name(), "CUSTOM");
        assert!(sim.page(pid, PageNumber(0)).unwrap().is_present());
        assert!(!sim.page(pid, PageNumber(1)).unwrap().is_present());
    }

    #[test]
    fn custom_policy_naming_bad_frame_is_an_invariant_failure() {
        let policy = CustomPolicy::new(|_: &[Candidate]| FrameIndex(99));
        let mut sim = Simulator::with_policy(SimConfig::new(PAGE, PAGE), Box::new(policy)).unwrap();
        let pid = sim.create_process(2 * PAGE);

        read(&mut sim, pid, 0);
        sim.take_events();
        let err = sim.translate(pid, PAGE, AccessKind::Read).unwrap_err();

        assert_eq!(
            err,
            SimError::Invariant(InvariantViolation::FrameOutOfRange {
                frame: 99,
                num_frames: 1
            })
        );
        assert_eq!(sim.total_accesses(), 1);
        assert_eq!(sim.page_faults(), 1);
        assert_eq!(sim.current_time(), 1);
        assert!(sim.events().is_empty());
        assert_eq!(sim.page(pid, PageNumber(0)).unwrap().frame(), Some(FrameIndex(0)));
        assert!(sim.check_invariants().is_ok());
    }

    /// Clears every bit it is shown, then names a frame that does not exist.
    struct ClearsThenMisses;

    impl ReplacementPolicy for ClearsThenMisses {
        fn name(&self) -> &'static str {
            "CLEARS-THEN-MISSES"
        }

        fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
            for candidate in candidates.iter_mut() {
                candidate.referenced = false;
            }
            Some(FrameIndex(candidates.len() + 7))
        }
    }

    #[test]
    fn rejected_victim_leaves_reference_bits_alone() {
        let mut sim =
            Simulator::with_policy(SimConfig::new(PAGE, 2 * PAGE), Box::new(ClearsThenMisses))
                .unwrap();
        let pid = sim.create_process(3 * PAGE);

        read(&mut sim, pid, 0);
        read(&mut sim, pid, PAGE);
        assert!(sim.translate(pid, 2 * PAGE, AccessKind::Write).is_err());

        assert!(sim.page(pid, PageNumber(0)).unwrap().referenced);
        assert!(sim.page(pid, PageNumber(1)).unwrap().referenced);
        assert!(!sim.page(pid, PageNumber(2)).unwrap().is_present());
        assert_eq!(sim.total_accesses(), 2);
        assert_eq!(sim.page_faults(), 2);
        assert_eq!(sim.current_time(), 2);

        // The engine is still usable afterwards.
        read(&mut sim, pid, 0);
        assert_eq!(sim.total_accesses(), sim.current_time());
    }

    #[test]
    fn unmapped_resident_page_is_a_frame_mismatch() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);
        read(&mut sim, pid, 0);

        sim.page_mut(pid, PageNumber(0)).unwrap().unmap();

        assert_eq!(
            sim.check_invariants(),
            Err(InvariantViolation::FrameMismatch {
                frame: FrameIndex(0),
                pid,
                page: PageNumber(0),
                page_frame: None,
            })
        );
    }

    #[test]
    fn emptied_frame_leaves_an_orphan_page() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);
        read(&mut sim, pid, PAGE);

        sim.memory_mut().evict(FrameIndex(0)).unwrap();

        assert_eq!(
            sim.check_invariants(),
            Err(InvariantViolation::OrphanPage {
                pid,
                page: PageNumber(1),
                frame: FrameIndex(0),
            })
        );
    }

    #[test]
    fn frame_held_by_unknown_process_is_dangling() {
        let mut sim = four_frames();
        sim.create_process(PAGE);

        let ghost = Occupant::new(ProcessId(7), PageNumber(0));
        sim.memory_mut().load(FrameIndex(2), ghost, 0).unwrap();

        assert_eq!(
            sim.check_invariants(),
            Err(InvariantViolation::DanglingOccupant {
                frame: FrameIndex(2),
                pid: ProcessId(7),
                page: PageNumber(0),
            })
        );
    }

    #[test]
    fn page_mapped_past_the_pool_is_out_of_range() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);

        sim.page_mut(pid, PageNumber(1)).unwrap().map(FrameIndex(50), 0);

        assert_eq!(
            sim.check_invariants(),
            Err(InvariantViolation::FrameOutOfRange {
                frame: 50,
                num_frames: 4
            })
        );
    }

    #[test]
    fn evicting_a_free_frame_is_reported() {
        let mut sim = four_frames();

        let err = sim.memory_mut().evict(FrameIndex(1)).unwrap_err();

        assert_eq!(
            InvariantViolation::from(err.clone()),
            InvariantViolation::FreeFrameEvicted { frame: 1 }
        );
        assert_eq!(
            SimError::from(err),
            SimError::Invariant(InvariantViolation::FreeFrameEvicted { frame: 1 })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invariant broken")]
    fn access_after_corruption_panics_in_debug_builds() {
        let mut sim = four_frames();
        let pid = sim.create_process(2 * PAGE);
        read(&mut sim, pid, 0);

        sim.page_mut(pid, PageNumber(0)).unwrap().unmap();

        let _ = sim.translate(pid, PAGE, AccessKind::Read);
    }

    #[test]
    fn stats_report_counters() {
        let mut sim = four_frames();
        let pid = sim.create_process(4 * PAGE);
        read(&mut sim, pid, 0);
        read(&mut sim, pid, 1);
        read(&mut sim, pid, 2);
        read(&mut sim, pid, PAGE);

        let stats = sim.stats();
        assert_eq!(stats.total_accesses, 4);
        assert_eq!(stats.page_faults, 2);
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.num_frames, 4);
        assert_eq!(stats.policy, "FIFO");
        assert!((stats.fault_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn handle_serializes_callers() {
        let handle = four_frames().into_handle();
        let pid = handle.lock().unwrap().create_process(4 * PAGE);

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    handle
                        .lock()
                        .unwrap()
                        .translate(pid, i * PAGE, AccessKind::Read)
                        .unwrap()
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let sim = handle.lock().unwrap();
        assert_eq!(sim.total_accesses(), 4);
        assert_eq!(sim.page_faults(), 4);
        assert_eq!(sim.current_time(), 4);
        assert!(sim.check_invariants().is_ok());
    }
}
