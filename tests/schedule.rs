mod tests {
    use aqua_curve_engine::{
        CHANNEL_COUNT, ChannelTargets, Horizon, MAX_TARGETS_PER_CHANNEL, MonotoneCurveSampler,
        RawSchedule, ScheduleBank, Target, TargetSink,
    };

    type Bank = ScheduleBank<8, 16, 256>;

    fn day_bank() -> Bank {
        Bank::new(Horizon::DAY, MonotoneCurveSampler::new(64).unwrap())
    }

    #[test]
    fn test_upsert_resamples_channel() {
        let mut bank = day_bank();
        bank.upsert(0, 43200.0, 70.0).unwrap();

        let samples = bank.samples(0);
        assert!(!samples.is_empty());
        assert_eq!(samples.first().unwrap().time, 0.0);
        assert_eq!(samples.last().unwrap().time, 86400.0);
        // A single anchor holds its value across the whole day.
        assert_eq!(bank.value_at(0, 21600.0), 70);
    }

    #[test]
    fn test_remove_updates_samples() {
        let mut bank = day_bank();
        bank.upsert(1, 21600.0, 30.0).unwrap();
        bank.upsert(1, 64800.0, 80.0).unwrap();
        bank.remove(1, 64800.0);

        assert_eq!(bank.value_at(1, 64800.0), 30);
        assert_eq!(bank.channel(1).unwrap().controls().anchors().count(), 1);
    }

    #[test]
    fn test_bank_holds_all_controller_channels() {
        let mut bank = day_bank();
        for channel in 0..CHANNEL_COUNT {
            bank.upsert(channel as u8, 43200.0, 50.0).unwrap();
        }

        assert_eq!(bank.values_at(43200.0).len(), CHANNEL_COUNT);
    }

    #[test]
    fn test_value_at_empty_channel_is_zero() {
        let bank = day_bank();
        assert_eq!(bank.value_at(5, 1000.0), 0);
    }

    #[test]
    fn test_values_at_covers_loaded_channels() {
        let mut bank = day_bank();
        bank.upsert(0, 43200.0, 70.0).unwrap();
        bank.upsert(3, 43200.0, 20.0).unwrap();

        let values = bank.values_at(43200.0);
        assert_eq!(values.len(), 2);
        assert!(values.contains(&(0, 70)));
        assert!(values.contains(&(3, 20)));
    }

    #[test]
    fn test_presampled_load_passes_through() {
        let mut bank = day_bank();
        let raw = [
            Target { time: 0, value: 10, is_control: false },
            Target { time: 43200, value: 60, is_control: false },
            Target { time: 86400, value: 10, is_control: false },
        ];
        bank.load(2, RawSchedule::classify(&raw)).unwrap();

        // No resampling: the three stored points are the curve.
        assert_eq!(bank.samples(2).len(), 3);
        assert_eq!(bank.value_at(2, 21600.0), 35);
    }

    #[test]
    fn test_presampled_load_sorts_by_time() {
        let mut bank = day_bank();
        let raw = [
            Target { time: 86400, value: 10, is_control: false },
            Target { time: 0, value: 10, is_control: false },
            Target { time: 43200, value: 60, is_control: false },
        ];
        bank.load(2, RawSchedule::PreSampled(&raw)).unwrap();

        let samples = bank.samples(2);
        assert_eq!(samples[0].time, 0.0);
        assert_eq!(samples[2].time, 86400.0);
    }

    #[test]
    fn test_authored_load_resamples() {
        let mut bank = day_bank();
        let raw = [
            Target { time: 21600, value: 10, is_control: true },
            Target { time: 43200, value: 90, is_control: true },
            Target { time: 64800, value: 10, is_control: true },
        ];
        bank.load(4, RawSchedule::classify(&raw)).unwrap();

        assert!(bank.samples(4).len() > raw.len());
        assert_eq!(bank.value_at(4, 43200.0), 90);
    }

    #[test]
    fn test_classify_mixed_list_is_authored() {
        let mixed = [
            Target { time: 0, value: 10, is_control: false },
            Target { time: 43200, value: 90, is_control: true },
        ];
        assert!(matches!(RawSchedule::classify(&mixed), RawSchedule::Authored(_)));

        let sampled = [Target { time: 0, value: 10, is_control: false }];
        assert!(matches!(
            RawSchedule::classify(&sampled),
            RawSchedule::PreSampled(_)
        ));
    }

    #[test]
    fn test_target_round_trip_is_stable() {
        let mut bank = day_bank();
        bank.upsert(0, 21600.0, 10.0).unwrap();
        bank.upsert(0, 43200.0, 80.0).unwrap();
        bank.upsert(0, 64800.0, 10.0).unwrap();

        let first = bank.targets::<128>(0);

        let mut reloaded = day_bank();
        reloaded.load(0, RawSchedule::classify(&first)).unwrap();
        let second = reloaded.targets::<128>(0);

        assert_eq!(first, second);
    }

    #[test]
    fn test_targets_respect_device_cap() {
        let mut bank = Bank::new(Horizon::DAY, MonotoneCurveSampler::new(256).unwrap());
        for i in 0..10u8 {
            bank.upsert(0, f32::from(i) * 8000.0, f32::from(i % 2) * 90.0)
                .unwrap();
        }

        let targets = bank.targets::<MAX_TARGETS_PER_CHANNEL>(0);
        assert!(targets.len() <= MAX_TARGETS_PER_CHANNEL);
        let times: Vec<u32> = targets.iter().map(|t| t.time).collect();
        let mut sorted = times.clone();
        sorted.sort_unstable();
        assert_eq!(times, sorted);
    }

    #[test]
    fn test_flush_writes_every_channel() {
        struct Collector(std::vec::Vec<(u8, usize)>);

        impl TargetSink for Collector {
            fn write(&mut self, channel: u8, targets: &[Target]) {
                self.0.push((channel, targets.len()));
            }
        }

        let mut bank = day_bank();
        bank.upsert(0, 43200.0, 70.0).unwrap();
        bank.upsert(2, 21600.0, 40.0).unwrap();

        let mut sink = Collector(Vec::new());
        bank.flush_to::<32, _>(&mut sink);

        assert_eq!(sink.0.len(), 2);
        assert!(sink.0.iter().all(|(_, count)| *count > 0 && *count <= 32));
    }

    #[test]
    fn test_channel_targets_serde_round_trip() {
        let payload: ChannelTargets<32> = ChannelTargets {
            channel: 2,
            targets: [Target { time: 10, value: 9, is_control: true }]
                .into_iter()
                .collect(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"isControl\":true"));
        assert!(json.contains("\"channel\":2"));

        let decoded: ChannelTargets<32> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.channel, payload.channel);
        assert_eq!(decoded.targets, payload.targets);
    }

    #[test]
    fn test_is_control_defaults_to_false_on_the_wire() {
        let json = r#"{"channel":1,"targets":[{"time":60,"value":50}]}"#;
        let decoded: ChannelTargets<32> = serde_json::from_str(json).unwrap();

        assert!(!decoded.targets[0].is_control);
    }
}
