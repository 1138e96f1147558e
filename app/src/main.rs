#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

use hal::{self, clocks::Clocks, pac};

use quadpulse_algo::position_tracker::{DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
use quadpulse_algo::PositionTracker;
use quadpulse_drivers::qei::Tim3Qei;

use cortex_m;

// One tracker per counter unit. Const-constructed so the interrupt and
// the foreground reach it without any init handshake; a second unit
// would be another static over Tim4Qei.
static TRACKER: PositionTracker<Tim3Qei> = PositionTracker::new(
    Tim3Qei::new(),
    DEFAULT_LOW_THRESHOLD,
    DEFAULT_HIGH_THRESHOLD,
);

#[rtic::app(device = pac, peripherals = true)]
mod app {
    use super::*;

    use quadpulse_drivers::pinout;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {}

    #[init]
    fn init(_ctx: init::Context) -> (Shared, Local) {
        let clock_cfg = Clocks::default();
        clock_cfg.setup().unwrap();
        defmt::debug!(
            "SYSTEM: Clock frequency is {} MHz",
            clock_cfg.sysclk() / 1_000_000
        );

        // Quadrature inputs, then the counter unit itself.
        pinout::encoder::QUAD_A.init();
        pinout::encoder::QUAD_B.init();
        TRACKER.counter().setup();

        // Zeroes the counter and arms the event chain; RTIC unmasks
        // the TIM3 line for the bound task below.
        TRACKER.start();

        (Shared {}, Local {})
    }

    // Trampoline from the timer vector to the tracker's event handler.
    // Overflow and threshold-compare events both arrive here.
    #[task(binds = TIM3)]
    fn tim3_event(_cx: tim3_event::Context) {
        TRACKER.handle_interrupt();
    }

    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        loop {
            defmt::info!("position: {}", TRACKER.position());
            cortex_m::asm::delay(16_000_000);
        }
    }
}

#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
