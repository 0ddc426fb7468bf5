use crate::{transfer::Interrupt, warning};

use super::EXIT_INTERRUPTED;

/// Installs the Ctrl-C handler of a command and returns its interrupt.
///
/// Registering the handler replaces the default SIGINT exit for the rest of
/// the process, so one handler serves every step of the command. The first
/// Ctrl-C triggers the interrupt and lets the running transfer wind down. A
/// second one exits right away, which also gets the user out of a pending
/// prompt.
pub fn on_ctrl_c() -> Interrupt {
    let interrupt = Interrupt::new();
    let flag = interrupt.clone();

    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if flag.is_triggered() {
                std::process::exit(EXIT_INTERRUPTED);
            }
            flag.trigger();
            warning!("Interrupted. Finishing the current track, press Ctrl-C again to quit.");
        }
    });

    interrupt
}

/// Exit code to return when the interrupt fired between steps of a command.
pub fn stopped(interrupt: &Interrupt) -> Option<i32> {
    interrupt.is_triggered().then(|| {
        warning!("Transfer interrupted by user.");
        EXIT_INTERRUPTED
    })
}
