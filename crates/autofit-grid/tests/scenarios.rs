use std::time::{Duration, Instant};

use autofit_grid::{
    BoxMetrics, ColumnOverrides, ColumnPlan, ColumnType, Container, DebugLog, FitAdjuster, Grid,
    GridError, GridSizer, Header, HeaderGroup, MonospaceMetrics, RecordingSink, SizingConfig,
    Stylesheet, Trace, VisualParams,
};

// 10px per character, 20px per line
fn metrics() -> MonospaceMetrics {
    MonospaceMetrics::new(1.0, 2.0)
}

fn styles() -> Stylesheet {
    Stylesheet::uniform(VisualParams::new(10.0))
}

fn people() -> Grid {
    Grid::new(vec![
        Header::new("ID"),
        Header::new("Full Name"),
        Header::new("Created At"),
    ])
    .rows(vec![
        vec![
            "1001",
            "Grace Brewster Murray Hopper, rear admiral and computing pioneer",
            "2024-01-01 10:00",
        ],
        vec!["1002", "Ada Lovelace", "2024-02-03 11:30"],
    ])
}

fn people_sizer(width: f64) -> GridSizer {
    GridSizer::builder()
        .container(Container::new(width))
        .grid(people())
        .config(SizingConfig::default().min_width(10.0))
        .metrics(metrics())
        .styles(styles())
        .build()
        .unwrap()
}

#[test]
fn structured_columns_keep_natural_width_and_text_absorbs_the_rest() {
    let sizer = people_sizer(600.0);

    assert_eq!(sizer.column_type(0), Some(ColumnType::Number));
    assert_eq!(sizer.column_type(1), Some(ColumnType::Text));
    assert_eq!(sizer.column_type(2), Some(ColumnType::DateTime));

    let widths = sizer.widths();
    assert_eq!(widths[0], 40.0);
    assert_eq!(widths[2], 160.0);
    assert!((widths[1] - 400.0).abs() < 1e-6);
    assert!((widths.iter().sum::<f64>() - 600.0).abs() < 1e-6);
    assert_eq!(sizer.content_ceiling(1), Some(640.0));
}

#[test]
fn text_column_stops_at_its_content_ceiling() {
    // every column reaches its ceiling; the remaining 60px is spread evenly
    let sizer = people_sizer(900.0);
    let widths = sizer.widths();
    assert!((widths[0] - 60.0).abs() < 1e-6);
    assert!((widths[1] - 660.0).abs() < 1e-6);
    assert!((widths[2] - 180.0).abs() < 1e-6);
}

#[test]
fn small_overflow_is_absorbed_by_text_columns() {
    let grid = Grid::new(vec![
        Header::new("Notes"),
        Header::new("Description"),
        Header::new("Qty"),
    ])
    .rows(vec![vec![
        "aaaaaaaaaaaaaaaaaaaa",
        "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        "12",
    ]]);
    let plans = [
        ColumnPlan::flexible(ColumnType::Text, 50.0, 200.0),
        ColumnPlan::flexible(ColumnType::Text, 50.0, 300.0),
        ColumnPlan::flexible(ColumnType::Number, 50.0, 20.0),
    ];
    let config = SizingConfig::default();
    let (m, s) = (metrics(), styles());
    let adjuster = FitAdjuster::new(&grid, &m, &s, &config);

    let widths = adjuster.adjust(vec![300.0, 400.0, 60.0], 710.0, &plans, &mut Trace::disabled());
    assert_eq!(widths.iter().sum::<f64>(), 710.0);
    assert_eq!(widths[2], 60.0);

    let widths = adjuster.adjust(vec![300.0, 400.0, 60.0], 460.0, &plans, &mut Trace::disabled());
    assert_eq!(widths, vec![300.0, 400.0, 60.0]);
}

fn overflowing(width: f64) -> GridSizer {
    let grid = Grid::new(vec![
        Header::new("Code").with_overrides(ColumnOverrides::new().fixed_width(200.0)),
        Header::new("Notes"),
    ])
    .rows(vec![vec!["X1", "abcdefghijklmnop"]]);
    GridSizer::builder()
        .container(Container::new(width))
        .grid(grid)
        .metrics(metrics())
        .styles(styles())
        .build()
        .unwrap()
}

#[test]
fn driver_shrinks_modest_overflow_and_keeps_fixed_width() {
    let sizer = overflowing(300.0);
    assert_eq!(sizer.widths(), &[200.0, 100.0]);
}

#[test]
fn driver_leaves_large_overflow_unresolved() {
    let sizer = overflowing(100.0);
    assert_eq!(sizer.widths(), &[200.0, 160.0]);
}

#[test]
fn fixed_width_survives_spare_space() {
    let sizer = overflowing(1000.0);
    assert_eq!(sizer.widths()[0], 200.0);
    assert!((sizer.widths()[1] - 800.0).abs() < 1e-6);
}

#[test]
fn recompute_is_idempotent() {
    let mut sizer = people_sizer(600.0);
    let first = sizer.recompute();
    let second = sizer.recompute();
    assert_eq!(first, second);
    assert_eq!(first.widths, sizer.widths().to_vec());
}

#[test]
fn prioritized_column_takes_spare_space_first() {
    let grid = Grid::new(vec![
        Header::new("Left"),
        Header::new("Right").with_overrides(ColumnOverrides::new().prioritize_spare_space()),
    ])
    .rows(vec![vec![
        "one two three four five six seven",
        "one two three four five six seven",
    ]]);
    let sizer = GridSizer::builder()
        .container(Container::new(550.0))
        .grid(grid)
        .metrics(metrics())
        .styles(styles())
        .build()
        .unwrap();

    // both measure 180px; the prioritized column reaches its 330px ceiling
    // before the other column sees the remaining 40px
    let widths = sizer.widths();
    assert_eq!(widths[1], 330.0);
    assert_eq!(widths[0], 220.0);
}

#[test]
fn groups_and_track_list_reach_the_sink() {
    let grid = Grid::new(vec![
        Header::new("First").with_overrides(ColumnOverrides::new().group("name")),
        Header::new("Last").with_overrides(ColumnOverrides::new().group("name")),
        Header::new("Email"),
    ])
    .rows(vec![vec!["Ada", "Lovelace", "ada@example.com"]])
    .group(HeaderGroup::new("name"));
    let sink = RecordingSink::new();
    let sizer = GridSizer::builder()
        .container(Container::new(400.0))
        .grid(grid)
        .metrics(metrics())
        .styles(styles().group("name", BoxMetrics::new().gap(4.0)))
        .sink(sink.clone())
        .build()
        .unwrap();

    let widths = sizer.widths();
    let expected = widths[0] + widths[1] + 4.0;
    assert_eq!(sink.group_width("name"), Some(expected));
    assert_eq!(sizer.group_widths().get("name"), Some(&expected));
    assert_eq!(
        sink.template_columns(),
        widths
            .iter()
            .map(|w| format!("{}px", w))
            .collect::<Vec<_>>()
            .join(" ")
    );
}

#[test]
fn resize_burst_triggers_one_pass() {
    let sink = RecordingSink::new();
    let mut sizer = GridSizer::builder()
        .container(Container::new(600.0))
        .grid(people())
        .config(SizingConfig::default().min_width(10.0))
        .metrics(metrics())
        .styles(styles())
        .sink(sink.clone())
        .build()
        .unwrap();
    assert_eq!(sink.applications(), 1);

    let start = Instant::now();
    for (ms, width) in [(0, 620.0), (20, 650.0), (40, 700.0)] {
        sizer
            .notify_resize(width, start + Duration::from_millis(ms))
            .unwrap();
    }
    assert!(sizer.poll(start + Duration::from_millis(100)).is_none());
    assert_eq!(sink.applications(), 1);

    let deadline = sizer.next_deadline().unwrap();
    let outcome = sizer.poll(deadline).unwrap();
    assert_eq!(sink.applications(), 2);
    assert!((outcome.total() - 700.0).abs() < 1e-6);
    assert!(sizer.next_deadline().is_none());
}

#[test]
fn content_change_takes_effect_on_recompute() {
    let mut sizer = people_sizer(600.0);
    sizer.replace_cells(
        ["1", "Ada", "2024-01-01 10:00"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let outcome = sizer.recompute();
    assert_eq!(sizer.column_type(0), Some(ColumnType::Number));
    assert_eq!(sizer.content_ceiling(1), Some(90.0));
    assert!((outcome.total() - 600.0).abs() < 1e-6);
}

#[test]
fn debug_trace_describes_each_pass() {
    let log = DebugLog::new();
    let mut sizer = GridSizer::builder()
        .container(Container::new(600.0))
        .grid(people())
        .config(SizingConfig::default().min_width(10.0).show_debug(true))
        .metrics(metrics())
        .styles(styles())
        .debug_sink(log.clone())
        .build()
        .unwrap();

    assert!(log.is_visible());
    assert!(log.contains("column 0: detected type number"));
    assert!(log.contains("column 1: final width 270px"));
    assert!(log.contains("applied grid-template-columns"));
    assert!(log.lines().iter().any(String::is_empty));

    sizer.set_debug_mode(false);
    log.clear();
    sizer.recompute();
    assert!(log.lines().is_empty());
    assert!(!log.is_visible());
}

#[test]
fn short_row_does_not_shift_later_cells() {
    let grid = Grid::new(vec![Header::new("Name"), Header::new("Amount")]).rows(vec![
        vec!["Ada"],
        vec!["Grace", "12"],
        vec!["Linus", "13"],
    ]);
    let sizer = GridSizer::builder()
        .container(Container::new(400.0))
        .grid(grid)
        .metrics(metrics())
        .styles(styles())
        .build()
        .unwrap();

    assert_eq!(sizer.column_type(0), Some(ColumnType::Text));
    assert_eq!(sizer.column_type(1), Some(ColumnType::Number));
}

#[test]
fn construction_requires_a_container() {
    let result = GridSizer::builder().grid(people()).build();
    assert!(matches!(result, Err(GridError::MissingContainer)));
}

#[test]
fn attribute_overrides_drive_sizing() {
    let grid = Grid::new(vec![
        Header::from_attributes("Code", [("data-fixed-width", "120px")]),
        Header::from_attributes("Amount", [("data-type", "number"), ("data-min-width", "oops")]),
    ])
    .rows(vec![vec!["A", "12 000"]]);
    let sizer = GridSizer::builder()
        .container(Container::new(170.0))
        .grid(grid)
        .metrics(metrics())
        .styles(styles())
        .build()
        .unwrap();

    assert_eq!(sizer.column_type(1), Some(ColumnType::Number));
    assert_eq!(sizer.widths()[0], 120.0);
    assert_eq!(sizer.widths()[1], 60.0);
}
