//! Tests for whole scan cycles across several adapters

#[cfg(test)]
mod tests {
    use super::super::{MockSource, bss, network};
    use crate::collectors::wlan::formatting::cycle_status;
    use crate::collectors::wlan::{ScanError, WlanCollector};
    use crate::models::{RawScanNetwork, RawSsid};

    #[test]
    fn test_single_adapter_cycle() {
        let source = MockSource::default().with_adapter(
            "wlan0",
            vec![network(b"Home", vec![6, 7], 80)],
            vec![bss(b"Home", 2_437_000, -48)],
        );
        let mut collector = WlanCollector::new(Box::new(source));

        let results = collector.run_scan_cycle().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].adapter_label, "wlan0 (wlan0-id)");
        assert_eq!(results[0].total_count, 1);

        let record = &results[0].records[0];
        assert_eq!(record.ssid, "Home");
        assert_eq!(record.channel, 6);
        assert_eq!(record.channel_frequency_mhz, 2437);
        assert_eq!(record.phy_capability, "802.11gn");
        assert_eq!(record.signal_dbm, -48);
        assert_eq!(record.signal_quality, 80);
        assert_eq!(collector.cycle_count(), 1);
    }

    #[test]
    fn test_no_adapters_is_empty_cycle() {
        let mut collector = WlanCollector::new(Box::new(MockSource::default()));
        let cycle = collector.collect_cycle().unwrap();
        assert!(cycle.results.is_empty());
        assert!(cycle.issues.is_empty());
        assert_eq!(cycle_status(&cycle.results), None);
    }

    #[test]
    fn test_enumeration_failure_fails_cycle() {
        let source = MockSource {
            fail_enumeration: true,
            ..MockSource::default()
        };
        let mut collector = WlanCollector::new(Box::new(source));

        let err = collector.run_scan_cycle().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, ScanError::AdapterEnumeration { .. }));
        assert!(collector.list_adapters().is_err());
    }

    #[test]
    fn test_failing_adapter_is_omitted() {
        let source = MockSource::default()
            .with_adapter("wlan0", vec![network(b"Home", vec![7], 80)], vec![])
            .with_failing_adapter("wlan1")
            .with_adapter("wlan2", vec![network(b"Cafe", vec![6], 40)], vec![]);
        let mut collector = WlanCollector::new(Box::new(source));

        let cycle = collector.collect_cycle().unwrap();
        let labels: Vec<_> = cycle.results.iter().map(|r| r.adapter_label.as_str()).collect();
        assert_eq!(labels, ["wlan0 (wlan0-id)", "wlan2 (wlan2-id)"]);

        assert_eq!(cycle.issues.len(), 1);
        assert!(!cycle.issues[0].is_fatal());
        assert_eq!(cycle.issues[0].adapter(), Some("wlan1 (wlan1-id)"));
    }

    #[test]
    fn test_bss_list_failure_omits_adapter() {
        let source = MockSource::default()
            .with_failing_bss_list("wlan0", vec![network(b"Home", vec![7], 80)])
            .with_adapter("wlan1", vec![network(b"Cafe", vec![6], 40)], vec![]);
        let mut collector = WlanCollector::new(Box::new(source));

        let cycle = collector.collect_cycle().unwrap();
        assert_eq!(cycle.results.len(), 1);
        assert_eq!(cycle.results[0].adapter_label, "wlan1 (wlan1-id)");

        assert_eq!(cycle.issues.len(), 1);
        assert!(matches!(cycle.issues[0], ScanError::ScanQuery { .. }));
        assert_eq!(cycle.issues[0].adapter(), Some("wlan0 (wlan0-id)"));
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let malformed = RawScanNetwork {
            ssid: RawSsid::new(33, vec![0u8; 32]),
            phy_types: vec![7],
            signal_quality: 20,
            security_enabled: false,
        };
        let source = MockSource::default().with_adapter(
            "wlan0",
            vec![
                network(b"First", vec![7], 90),
                malformed,
                network(b"Third", vec![6], 30),
            ],
            vec![],
        );
        let mut collector = WlanCollector::new(Box::new(source));

        let cycle = collector.collect_cycle().unwrap();
        let result = &cycle.results[0];
        assert_eq!(result.total_count, 2);
        assert_eq!(result.records[0].ssid, "First");
        assert_eq!(result.records[1].ssid, "Third");
        assert!(matches!(cycle.issues[0], ScanError::Decode { .. }));
    }

    #[test]
    fn test_records_follow_source_order() {
        let source = MockSource::default().with_adapter(
            "wlan0",
            vec![
                network(b"Zulu", vec![7], 10),
                network(b"Alpha", vec![7], 90),
                network(b"Mike", vec![7], 50),
            ],
            vec![bss(b"Mike", 2_412_000, -30)],
        );
        let mut collector = WlanCollector::new(Box::new(source));

        let results = collector.run_scan_cycle().unwrap();
        let ssids: Vec<_> = results[0].records.iter().map(|r| r.ssid.as_str()).collect();
        assert_eq!(ssids, ["Zulu", "Alpha", "Mike"]);
        assert_eq!(results[0].records[2].channel, 1);
    }

    #[test]
    fn test_status_reports_last_adapter() {
        let source = MockSource::default()
            .with_adapter(
                "wlan0",
                vec![network(b"A", vec![7], 10), network(b"B", vec![7], 10)],
                vec![],
            )
            .with_adapter("wlan1", vec![network(b"C", vec![7], 10)], vec![]);
        let mut collector = WlanCollector::new(Box::new(source));

        let results = collector.run_scan_cycle().unwrap();
        assert_eq!(cycle_status(&results).as_deref(), Some("1 network(s) detected."));
    }

    #[test]
    fn test_cycles_are_independent() {
        let source = MockSource::default().with_adapter(
            "wlan0",
            vec![network(b"Home", vec![7], 80)],
            vec![bss(b"Home", 2_437_000, -48)],
        );
        let mut collector = WlanCollector::new(Box::new(source));

        let first = collector.run_scan_cycle().unwrap();
        let second = collector.run_scan_cycle().unwrap();
        assert_eq!(first, second);
        assert_eq!(collector.cycle_count(), 2);
    }
}
