//! swarm — smallest example for the tickreg framework.
//!
//! Hives spawn bees every frame; bees live a few frames, occasionally sting
//! a random neighbour (unregistering it mid-pass), and expire.  Every bee
//! checks that it is never ticked twice in one frame, so a run that
//! completes is also a run in which the registry never double-ticked.
//!
//! Usage: `swarm [config.toml]`

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tr_core::{DispatchConfig, Frame, SlotId, TickError, TickResult};
use tr_dispatch::{CategorySummary, DispatchObserver, DispatcherBuilder};
use tr_registry::{Registry, SlotHandle, Tickable};

// ── Constants ─────────────────────────────────────────────────────────────────

const HIVE_COUNT:     usize = 4;
const SEED:           u64   = 42;
const SPAWN_CHANCE:   f64   = 0.8;
const STING_CHANCE:   f64   = 0.05;
const MAX_BEE_FRAMES: u32   = 12;

/// State shared by every element in the run.
struct Meadow {
    rng:    RefCell<SmallRng>,
    frame:  Cell<Frame>,
    stings: Cell<u64>,
}

// ── Bees ──────────────────────────────────────────────────────────────────────

struct Bee {
    slot:       SlotHandle,
    remaining:  Cell<u32>,
    last_frame: Cell<Option<Frame>>,
    meadow:     Rc<Meadow>,
}

impl Tickable for Bee {
    fn slot(&self) -> &SlotHandle {
        &self.slot
    }

    fn tick(&self, registry: &Registry<Self>) -> TickResult<()> {
        let now = self.meadow.frame.get();
        if self.last_frame.replace(Some(now)) == Some(now) {
            return Err(TickError::element(format!("bee at {} ticked twice in {now}", self.slot.get())));
        }

        let (sting, pick) = {
            let mut rng = self.meadow.rng.borrow_mut();
            (rng.gen_bool(STING_CHANCE), rng.gen_range(0..registry.len().max(1)))
        };
        if sting {
            if let Some(victim) = registry.get(SlotId(pick as u32)) {
                if !std::ptr::eq(Rc::as_ptr(&victim), self) {
                    registry.unregister(&victim);
                    self.meadow.stings.set(self.meadow.stings.get() + 1);
                }
            }
        }

        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        if left == 0 {
            registry.unregister(self);
        }
        Ok(())
    }
}

// ── Hives ─────────────────────────────────────────────────────────────────────

struct Hive {
    slot:   SlotHandle,
    bees:   Rc<Registry<Bee>>,
    meadow: Rc<Meadow>,
}

impl Tickable for Hive {
    fn slot(&self) -> &SlotHandle {
        &self.slot
    }

    fn tick(&self, _registry: &Registry<Self>) -> TickResult<()> {
        let lifetime = {
            let mut rng = self.meadow.rng.borrow_mut();
            if !rng.gen_bool(SPAWN_CHANCE) {
                return Ok(());
            }
            rng.gen_range(1..=MAX_BEE_FRAMES)
        };
        self.bees.add(Rc::new(Bee {
            slot:       SlotHandle::new(),
            remaining:  Cell::new(lifetime),
            last_frame: Cell::new(None),
            meadow:     Rc::clone(&self.meadow),
        }));
        Ok(())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

struct Progress {
    meadow: Rc<Meadow>,
    ticks:  u64,
}

impl DispatchObserver for Progress {
    fn on_frame_start(&mut self, frame: Frame) {
        self.meadow.frame.set(frame);
    }

    fn on_frame_end(&mut self, _frame: Frame, ticked: usize) {
        self.ticks += ticked as u64;
    }

    fn on_report(&mut self, frame: Frame, summaries: &[CategorySummary]) {
        let line: Vec<String> = summaries
            .iter()
            .map(|s| format!("{} {}/{}", s.name, s.live, s.capacity))
            .collect();
        println!("{frame:>6}  {}", line.join("  "));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => DispatchConfig::load(path)?,
        None => DispatchConfig {
            total_frames: 300,
            report_interval_frames: 50,
            ..DispatchConfig::default()
        },
    };

    println!("=== swarm — tickreg dispatch demo ===");
    println!("Hives: {HIVE_COUNT}  |  Frames: {}  |  Seed: {SEED}", config.total_frames);
    println!();

    let mut dispatcher = DispatcherBuilder::new(config)
        .category::<Hive>("hives")
        .category::<Bee>("bees")
        .build()?;

    let meadow = Rc::new(Meadow {
        rng:    RefCell::new(SmallRng::seed_from_u64(SEED)),
        frame:  Cell::new(Frame::ZERO),
        stings: Cell::new(0),
    });

    let hives = dispatcher.registry::<Hive>().ok_or_else(|| anyhow::anyhow!("hives not registered"))?;
    let bees = dispatcher.registry::<Bee>().ok_or_else(|| anyhow::anyhow!("bees not registered"))?;
    for _ in 0..HIVE_COUNT {
        hives.add(Rc::new(Hive {
            slot:   SlotHandle::new(),
            bees:   Rc::clone(&bees),
            meadow: Rc::clone(&meadow),
        }));
    }

    let mut progress = Progress { meadow: Rc::clone(&meadow), ticks: 0 };
    let t0 = Instant::now();
    dispatcher.run(&mut progress)?;
    let elapsed = t0.elapsed();

    let stats = bees.stats();
    println!();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks delivered : {}", progress.ticks);
    println!("  stings          : {}", meadow.stings.get());
    println!("  bees alive      : {}", stats.count);
    println!("  bee capacity    : {} ({} grow events)", stats.capacity, stats.grow_events);
    println!("  shifted moves   : {}", stats.shifted_moves);

    if !bees.is_dense() {
        anyhow::bail!("bee registry lost density");
    }
    Ok(())
}
