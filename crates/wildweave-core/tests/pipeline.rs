//! End-to-end pipeline behaviour over in-memory collaborators.
//!
//! Fields are uniform so every coordinate reads the same; wall-clock time
//! is pinned so cache expiry and regeneration are exact.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use wildweave_core::{DescriptionPipeline, EngineConfig, FALLBACK_DESCRIPTION, GameClock};
use wildweave_narrative::{InMemoryHintSource, RectRegion, RectRegionIndex};
use wildweave_types::{
    Coord, HintCategory, HintId, RegionHint, RegionId, RegionKind, RegionRef, ResourceKind,
    RoomVnum, SectorType, Sky,
};
use wildweave_world::{CharacterView, RoomView, UniformFields};

const ZONE: i32 = 0;
const RIDGE: &str = "A low wall of stones runs along the ridge.";

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn fields() -> UniformFields {
    UniformFields {
        weather: 30,
        sector: Some(SectorType::Forest),
        ..UniformFields::default()
    }
}

fn ridge_hint() -> RegionHint {
    RegionHint {
        id: HintId::new(1),
        region: RegionId::new(5),
        category: HintCategory::Atmosphere,
        text: RIDGE.to_owned(),
        priority: 10,
        weather_conditions: String::new(),
        seasonal_weights: serde_json::Value::Null,
        time_weights: serde_json::Value::Null,
        resource_triggers: serde_json::Value::Null,
        created_at: t0(),
        active: true,
    }
}

fn index() -> RectRegionIndex {
    RectRegionIndex::new(vec![RectRegion {
        region: RegionRef {
            id: RegionId::new(5),
            kind: RegionKind::Geographic,
            name: "Greywood".to_owned(),
        },
        zone: ZONE,
        min: Coord::new(0, 0),
        max: Coord::new(99, 99),
        characteristics: serde_json::Value::Null,
    }])
}

fn pipeline(source: Arc<InMemoryHintSource>) -> DescriptionPipeline<UniformFields> {
    let mut pipeline =
        DescriptionPipeline::new(EngineConfig::default(), fields(), Box::new(source), Box::new(index()));
    pipeline.pin_wall_clock(Some(t0()));
    pipeline
}

fn room(x: i32, y: i32) -> RoomView {
    RoomView::wilderness(RoomVnum::new(1_000_001), ZONE, Coord::new(x, y), SectorType::Forest)
}

#[test]
fn base_description_is_terminated() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    let viewer = CharacterView::named("Ayla");
    let text = pipeline.generate_resource_aware_description(&viewer, &room(10, 10));
    assert!(text.is_some());
    let text = text.unwrap();
    assert!(text.ends_with("\r\n"));
    assert!(text.len() > 10);
}

#[test]
fn static_rooms_get_no_base_description() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    let viewer = CharacterView::named("Ayla");
    let room = RoomView::static_room(RoomVnum::new(3001), 30, SectorType::Field, Sky::Cloudless);
    assert!(pipeline.generate_resource_aware_description(&viewer, &room).is_none());
}

#[test]
fn enhancement_needs_a_region_and_hints() {
    let source = Arc::new(InMemoryHintSource::new().with_hint(ridge_hint()));
    let mut pipeline = pipeline(source);
    let viewer = CharacterView::named("Ayla");
    // Outside every region.
    assert!(
        pipeline
            .enhance_base_description_with_hints("A forest.\r\n", &viewer, ZONE, 500, 500)
            .is_none()
    );

    let mut empty = self::pipeline(Arc::new(InMemoryHintSource::new()));
    assert!(
        empty
            .enhance_base_description_with_hints("A forest.\r\n", &viewer, ZONE, 10, 10)
            .is_none()
    );
}

#[test]
fn enhancement_appends_hints_and_records_usage() {
    let source = Arc::new(InMemoryHintSource::new().with_hint(ridge_hint()));
    let mut pipeline = pipeline(Arc::clone(&source));
    let viewer = CharacterView::named("Ayla");

    let text = pipeline.enhance_base_description_with_hints("Old pines crowd the slope.\r\n", &viewer, ZONE, 10, 10);
    assert_eq!(text.as_deref(), Some("Old pines crowd the slope. A low wall of stones runs along the ridge.\r\n"));

    let usage = source.usage();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].hint, HintId::new(1));
    assert_eq!(usage[0].at, Coord::new(10, 10));
    assert_eq!(usage[0].weather, "clear");
}

#[test]
fn unified_prefers_the_authored_region_description() {
    let source = Arc::new(
        InMemoryHintSource::new()
            .with_hint(ridge_hint())
            .with_description(RegionId::new(5), "An old forest of grey oaks"),
    );
    let mut pipeline = pipeline(source);
    let text = pipeline.create_unified_wilderness_description(ZONE, 20, 20);
    assert_eq!(
        text.as_deref(),
        Some("An old forest of grey oaks. A low wall of stones runs along the ridge.\r\n")
    );
}

#[test]
fn unified_without_hints_returns_the_base() {
    let source = Arc::new(InMemoryHintSource::new().with_description(RegionId::new(5), "Quiet woods."));
    let mut pipeline = pipeline(source);
    assert_eq!(
        pipeline.create_unified_wilderness_description(ZONE, 20, 20).as_deref(),
        Some("Quiet woods.\r\n")
    );
    assert!(pipeline.create_unified_wilderness_description(ZONE, -5, -5).is_none());
}

#[test]
fn unified_generates_a_base_without_an_authored_description() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    let text = pipeline.create_unified_wilderness_description(ZONE, 20, 20);
    assert!(text.is_some());
    assert!(text.unwrap().ends_with("\r\n"));
}

#[test]
fn describe_falls_back_to_the_generated_base_outside_regions() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new().with_hint(ridge_hint())));
    let viewer = CharacterView::named("Ayla");
    let text = pipeline.describe_wilderness(&viewer, ZONE, 500, 500);
    assert_ne!(text, FALLBACK_DESCRIPTION);
    assert!(!text.contains(RIDGE));
    assert!(text.ends_with("\r\n"));

    let inside = pipeline.describe_wilderness(&viewer, ZONE, 10, 10);
    assert!(inside.contains(RIDGE));
}

#[test]
fn same_tile_same_hour_reads_the_same() {
    let viewer = CharacterView::named("Ayla");
    let mut first = pipeline(Arc::new(InMemoryHintSource::new().with_hint(ridge_hint())));
    let mut second = pipeline(Arc::new(InMemoryHintSource::new().with_hint(ridge_hint())));
    for pipeline in [&mut first, &mut second] {
        pipeline.set_clock(GameClock::from_calendar(3, 4, 12, 9).unwrap());
    }
    assert_eq!(
        first.describe_wilderness(&viewer, ZONE, 42, 17),
        second.describe_wilderness(&viewer, ZONE, 42, 17)
    );
    assert_eq!(
        first.describe_wilderness(&viewer, ZONE, 42, 17),
        first.describe_wilderness(&viewer, ZONE, 42, 17)
    );
}

#[test]
fn harvest_depletes_and_survives_snapshot() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    let before = pipeline.resource_level(ResourceKind::Vegetation, 7, 7);
    let outcome = pipeline.harvest(ResourceKind::Vegetation, 7, 7, 0.5).unwrap();
    assert!(outcome.level_after < outcome.level_before);
    assert!(pipeline.resource_level(ResourceKind::Vegetation, 7, 7) < before);
    assert!(pipeline.harvest(ResourceKind::Vegetation, 7, 7, -1.0).is_err());

    let records = pipeline.harvest_snapshot();
    assert!(!records.is_empty());

    let mut restored = self::pipeline(Arc::new(InMemoryHintSource::new()));
    assert_eq!(restored.restore_harvest(&records).unwrap(), records.len());
    let here = pipeline.resource_level(ResourceKind::Vegetation, 7, 7);
    let there = restored.resource_level(ResourceKind::Vegetation, 7, 7);
    assert!((here - there).abs() < 1e-6);
    assert_eq!(restored.stats().harvest_nodes, 1);
}

#[test]
fn unknown_resource_index_reads_zero() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    assert!(pipeline.resource_level_by_index(99, 0, 0).abs() < f32::EPSILON);
}

#[test]
fn maintenance_sweeps_expired_caches() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new().with_hint(ridge_hint())));
    let viewer = CharacterView::named("Ayla");
    let _ = pipeline.describe_wilderness(&viewer, ZONE, 10, 10);

    let stats = pipeline.stats();
    assert!(stats.resource_cache.total_entries > 0);
    assert!(stats.hint_cache.entries > 0);

    pipeline.pin_wall_clock(Some(t0() + Duration::hours(1)));
    let report = pipeline.maintain();
    assert!(report.resource_cells > 0);
    assert!(report.hint_entries > 0);
    assert_eq!(pipeline.stats().resource_cache.total_entries, 0);
}

#[test]
fn survey_and_map_render() {
    let mut pipeline = pipeline(Arc::new(InMemoryHintSource::new()));
    let survey = pipeline.survey(3, 4);
    assert_eq!(survey.at, Coord::new(3, 4));
    assert!(survey.render().starts_with("Resource Survey for (3, 4):"));

    let map = pipeline.resource_map(ResourceKind::Vegetation, 3, 4, 3);
    assert!(map.contains('@'));
}
