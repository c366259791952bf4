//! Flip demo: lays out a column of cards, reverses their order and plays the
//! transition on an in-memory document, printing each frame's styles.
//!
//! Run with `RUST_LOG=debug cargo run` to see the driver's decisions.

use anyhow::{Context, Result};
use flip_config::FlipConfig;
use flip_scene::{
    AnimationDefaults, AnimationOptIns, ElementConfig, EventQueue, FlipEvent, Flipper,
    MemoryDocument, NodeId, NodeSpec, Rect, Viewport,
};

const FRAME_MS: f32 = 1000.0 / 60.0;
const CARD_HEIGHT: f64 = 60.0;
const CARD_GAP: f64 = 12.0;

fn card_rect(index: usize, width: f64) -> Rect {
    Rect::new(
        24.0,
        24.0 + index as f64 * (CARD_HEIGHT + CARD_GAP),
        width,
        CARD_HEIGHT,
    )
}

fn report(frame: usize, events: &mut EventQueue<NodeId>) {
    for event in events.drain() {
        match event {
            FlipEvent::Started(t) => println!("[{frame:>3}] started   {}", t.flip_id),
            FlipEvent::Completed(t) => println!("[{frame:>3}] completed {}", t.flip_id),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = FlipConfig::load();
    let defaults = AnimationDefaults::from_config(&config.animation)
        .context("invalid [animation] configuration")?;
    log::info!(
        "flip demo: {}ms {:?}, viewport {}x{}",
        defaults.duration_ms,
        defaults.easing,
        config.viewport.width,
        config.viewport.height
    );

    let mut doc = MemoryDocument::new(Viewport::from(&config.viewport));
    let root = doc.root();
    let list = doc.append(root, NodeSpec::plain());

    let card_config = ElementConfig::new()
        .with_opt_ins(AnimationOptIns::all())
        .with_transform_origin("top left".parse()?);
    let label_config = ElementConfig::new().with_opt_ins(AnimationOptIns::size());

    let cards: Vec<NodeId> = (0..4)
        .map(|i| {
            let id = format!("card-{i}");
            let card = doc.append(
                list,
                NodeSpec::tracked(&id)
                    .group("list")
                    .rect(card_rect(i, 320.0))
                    .config(card_config.clone()),
            );
            doc.append(card, NodeSpec::inverse_of(&id).config(label_config.clone()));
            card
        })
        .collect();

    let mut flipper = Flipper::new(list, defaults);
    let mut events = EventQueue::new();
    flipper.record(&doc);

    // Reverse the order and widen the first card.
    for (i, card) in cards.iter().rev().enumerate() {
        let width = if i == 0 { 480.0 } else { 320.0 };
        doc.set_rect(*card, card_rect(i, width));
    }
    flipper.animate(&mut doc, &mut events);
    report(0, &mut events);

    let mut frame = 0;
    while flipper.has_pending_work() {
        flipper.tick(&mut doc, &mut events, FRAME_MS);
        frame += 1;
        report(frame, &mut events);
        if frame % 4 == 0 {
            for card in &cards {
                println!(
                    "      {:<7} {}",
                    doc.flip_id_of(*card).unwrap_or("?"),
                    doc.inline_transform(*card).unwrap_or("none")
                );
            }
        }
    }

    println!("settled after {frame} frames");
    Ok(())
}
