use ic_trace_metrics::aggregator::{
    bandwidth_by_time, calculate_metrics, message_type_distribution, traffic_by_entity,
    TrafficTotals,
};
use ic_trace_metrics::parser::{normalize, parse_line, Entity, EventRecord, TraceVariant};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn fixed(lines: &[&str], entity: Entity) -> Vec<EventRecord> {
    lines
        .iter()
        .filter_map(|line| parse_line(line, TraceVariant::FixedField))
        .filter_map(|raw| normalize(raw, entity, 8))
        .collect()
}

fn interconnect_events() -> Vec<EventRecord> {
    fixed(
        &["MSG_A 1 64 P3 0", "MSG_B 0 32 P3 0", "MSG_A 1 16 P1 1"],
        Entity::Interconnect,
    )
}

#[test]
fn test_interconnect_example() {
    let events = interconnect_events();

    assert_eq!(bandwidth_by_time(&events), BTreeMap::from([(0, 96), (1, 16)]));
    assert_eq!(
        message_type_distribution(&events),
        BTreeMap::from([("MSG_A".to_string(), 2), ("MSG_B".to_string(), 1)])
    );
}

#[test]
fn test_pe_example() {
    let events = fixed(&["MSG_A 1 64 IC 0", "MSG_C 0 8 IC 2"], Entity::Pe(0));

    let traffic = traffic_by_entity(&events, 8);
    assert_eq!(
        traffic[&0],
        TrafficTotals {
            sent: 64,
            received: 8,
            transferred: 0
        }
    );
}

#[test]
fn test_results_are_order_independent() {
    let mut events = interconnect_events();
    events.extend(fixed(&["MSG_A 1 64 IC 0", "MSG_C 0 8 IC 0"], Entity::Pe(2)));
    events.extend(fixed(&["READ_MEM 1 4 IC 7"], Entity::Interconnect));

    let forward = calculate_metrics(&events, 4);

    let mut reversed = events.clone();
    reversed.reverse();
    assert_eq!(calculate_metrics(&reversed, 4), forward);

    let mut rotated = events.clone();
    rotated.rotate_left(2);
    assert_eq!(calculate_metrics(&rotated, 4), forward);
}

#[test]
fn test_traffic_reports_exact_roster() {
    let events = fixed(&["MSG_A 1 64 IC 0"], Entity::Pe(5));

    for pe_count in [6, 8, 16] {
        let traffic = traffic_by_entity(&events, pe_count);
        assert_eq!(traffic.len(), pe_count);
        assert_eq!(traffic.keys().copied().collect::<Vec<_>>(), (0..pe_count).collect::<Vec<_>>());
    }

    // PE5 is outside a roster of 4 and contributes nothing
    let traffic = traffic_by_entity(&events, 4);
    assert_eq!(traffic.len(), 4);
    assert!(traffic.values().all(|t| t.total() == 0));
}

#[test]
fn test_message_counts_sum_to_interconnect_events() {
    let mut events = interconnect_events();
    events.extend(fixed(&["MSG_A 1 64 IC 0", "MSG_C 0 8 IC 2"], Entity::Pe(1)));

    let counts = message_type_distribution(&events);
    let total: u64 = counts.values().sum();
    let interconnect = events.iter().filter(|e| e.crosses_interconnect()).count() as u64;

    assert_eq!(total, interconnect);
    assert_eq!(total, 3);
}

#[test]
fn test_tabular_events_feed_every_aggregation() {
    let events: Vec<EventRecord> = ["5,2,3,150,MSG_X", "5,0,1,50,MSG_Y", "6,2,1,10,MSG_X"]
        .iter()
        .filter_map(|line| parse_line(line, TraceVariant::Tabular))
        .filter_map(|raw| normalize(raw, Entity::Interconnect, 4))
        .collect();

    let metrics = calculate_metrics(&events, 4);

    assert_eq!(metrics.bandwidth_by_time, BTreeMap::from([(5, 200), (6, 10)]));
    assert_eq!(metrics.message_types["MSG_X"], 2);
    assert_eq!(metrics.traffic_by_entity[&2].transferred, 160);
    assert_eq!(metrics.traffic_by_entity[&2].sent, 0);
    assert_eq!(metrics.traffic_by_entity[&0].transferred, 50);
    assert_eq!(metrics.traffic_by_entity.len(), 4);
}
