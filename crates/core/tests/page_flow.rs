//! Integration test: drive a whole page through the interactions a visitor
//! would make and check state and rendered output together.

use paddock_core::svg::render_svg;
use paddock_core::{Page, SectionId};
use paddock_protocol::{HitTarget, Interaction, RenderCommand, ThemeMode, Viewport};

fn click(target: HitTarget) -> Interaction {
    Interaction::Click(target)
}

/// Text drawn inside the first group named `id`, nested groups included.
fn group_texts(commands: &[RenderCommand], id: &str) -> Option<Vec<String>> {
    let start = commands.iter().position(
        |c| matches!(c, RenderCommand::BeginGroup { id: group, .. } if group.as_str() == id),
    )?;
    let mut depth = 0usize;
    let mut texts = Vec::new();
    for cmd in &commands[start..] {
        match cmd {
            RenderCommand::BeginGroup { .. } => depth += 1,
            RenderCommand::EndGroup => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            RenderCommand::DrawText { text, .. } => texts.push(text.to_string()),
            _ => {}
        }
    }
    Some(texts)
}

fn hit_targets(commands: &[RenderCommand]) -> Vec<HitTarget> {
    commands.iter().filter_map(|c| c.hit().cloned()).collect()
}

#[test]
fn red_bull_driver_stats_round_trip() {
    let viewport = Viewport::new(1280.0, 800.0);
    let mut page = Page::new(0.0);

    assert!(page.dispatch(&click(HitTarget::TeamTab("redbull".into())), 10.0));
    let drivers: Vec<&str> = page.grid().driver().items().iter().map(|d| d.name).collect();
    assert_eq!(drivers, ["Max Verstappen", "Sergio Perez"]);

    let grid = page.render_section(SectionId::Grid, &viewport, 11.0);
    assert!(group_texts(&grid.commands, "driver-modal").is_none());
    assert!(hit_targets(&grid.commands).contains(&HitTarget::DriverCard("verstappen".into())));

    assert!(page.dispatch(&click(HitTarget::DriverCard("verstappen".into())), 12.0));
    let grid = page.render_section(SectionId::Grid, &viewport, 13.0);
    let texts = group_texts(&grid.commands, "driver-modal").expect("modal should be drawn");
    for expected in ["Max Verstappen", "62", "110", "4", "WINS", "PODIUMS", "TITLES"] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected} in {texts:?}");
    }
    let stats = page.grid().driver().current().map(|d| d.stats);
    assert_eq!(
        stats.map(|s| (s.wins, s.podiums, s.championships)),
        Some((62, 110, 4))
    );

    assert!(page.dispatch(&click(HitTarget::DriverClose), 14.0));
    let grid = page.render_section(SectionId::Grid, &viewport, 15.0);
    assert!(group_texts(&grid.commands, "driver-modal").is_none());
    assert_eq!(page.grid().driver().current_key(), None);
    assert_eq!(page.grid().team().current_key(), Some("redbull"));
}

#[test]
fn defaults_on_a_fresh_page() {
    let page = Page::new(0.0);
    assert_eq!(page.machine().tyre().current_key(), Some("Soft"));
    assert_eq!(page.machine().part().current_key(), None);
    assert_eq!(page.grid().team().current_key(), Some("ferrari"));
    assert_eq!(page.grid().driver().current_key(), None);
    assert_eq!(page.circuits().track().current_key(), Some("monaco"));
    assert_eq!(page.rules().open().current_key(), Some("qualifying"));
    assert_eq!(page.basics().essentials().current_key(), None);
}

fn snapshot(page: &Page) -> Vec<Option<&'static str>> {
    vec![
        page.machine().tyre().current_key(),
        page.machine().part().current_key(),
        page.grid().team().current_key(),
        page.grid().driver().current_key(),
        page.circuits().track().current_key(),
        page.rules().open().current_key(),
        page.basics().essentials().current_key(),
    ]
}

#[test]
fn unknown_ids_change_nothing() {
    let mut page = Page::new(0.0);
    let before = snapshot(&page);
    let generation = page.circuits().animator().generation();
    let bogus = [
        HitTarget::CarPart("diffuser".into()),
        HitTarget::Tyre("Intermediate".into()),
        HitTarget::TeamTab("williams".into()),
        HitTarget::DriverCard("senna".into()),
        HitTarget::TrackItem("spa".into()),
        HitTarget::RuleHeader("drs".into()),
        HitTarget::Essential("drs".into()),
    ];
    for target in bogus {
        assert!(!page.dispatch(&click(target.clone()), 1.0));
        assert!(!page.dispatch(&Interaction::HoverEnter(target), 1.0));
    }
    assert_eq!(snapshot(&page), before);
    assert_eq!(page.circuits().animator().generation(), generation);
}

#[test]
fn accordion_is_single_open() {
    let mut page = Page::new(0.0);
    let header = |id: &str| click(HitTarget::RuleHeader(id.into()));

    page.dispatch(&header("qualifying"), 1.0);
    assert_eq!(page.rules().open().current_key(), None);
    page.dispatch(&header("qualifying"), 2.0);
    assert_eq!(page.rules().open().current_key(), Some("qualifying"));

    page.dispatch(&header("points"), 3.0);
    assert_eq!(page.rules().open().current_key(), Some("points"));
    page.dispatch(&header("points"), 4.0);
    page.dispatch(&header("points"), 5.0);
    assert_eq!(page.rules().open().current_key(), Some("points"));
}

#[test]
fn switching_track_restarts_the_map() {
    let mut page = Page::new(0.0);
    let old = page.circuits().animator().generation();

    // Mid-sweep on Monaco.
    assert!(page.circuits().animator().frame(4.0).sweep.is_some());

    assert!(page.dispatch(&click(HitTarget::TrackItem("silverstone".into())), 4.0));
    let animator = page.circuits().animator();
    assert!(animator.generation() > old);
    assert!(animator.frame_for(old, 4.5).is_none());

    // The new outline starts drawing once the old panel has left.
    let first = animator.frame(4.3);
    assert!(first.drawn < 1e-6);
    assert!(first.sweep.is_none());
    assert!(animator.frame(5.0).sweep.is_none());

    // Re-selecting the active track is a no-op.
    let current = animator.generation();
    assert!(!page.dispatch(&click(HitTarget::TrackItem("silverstone".into())), 6.0));
    assert_eq!(page.circuits().animator().generation(), current);
}

#[test]
fn unmount_restores_defaults() {
    let mut page = Page::new(0.0);
    page.dispatch(&click(HitTarget::TeamTab("mclaren".into())), 1.0);
    page.dispatch(&click(HitTarget::DriverCard("norris".into())), 2.0);
    page.dispatch(&click(HitTarget::CarPart("floor".into())), 2.0);
    page.dispatch(&click(HitTarget::Tyre("Hard".into())), 2.0);
    page.dispatch(&click(HitTarget::TrackItem("suzuka".into())), 2.0);
    page.dispatch(&click(HitTarget::RuleHeader("flags".into())), 2.0);

    for section in SectionId::ALL {
        page.unmount(section, 3.0);
    }
    assert_eq!(snapshot(&page), snapshot(&Page::new(0.0)));
}

#[test]
fn page_exports_as_balanced_svg() {
    let mut page = Page::new(0.0);
    page.dispatch(&click(HitTarget::CarPart("halo".into())), 1.0);
    page.dispatch(&click(HitTarget::DriverCard("hamilton".into())), 1.0);

    let viewport = Viewport::new(1024.0, 768.0);
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        let rendered = page.render(&viewport, 1.1);
        let svg = render_svg(&rendered.commands, viewport.width, rendered.height, mode);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        assert!(svg.contains("Lewis Hamilton"));
        assert!(svg.contains("Circuit de Monaco"));
    }
}
