use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded message pump driving the desktop.
///
/// The loop is the only place that polls the input driver. Every event is
/// handed to the handler as `Some(event)`; when a tick elapses with no input
/// the handler sees `None`, which is where redraws happen.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (mouse drags report every cell) before the next
                // redraw so the screen never lags behind the pointer.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drains_burst_then_quits() {
        let script = Scripted([key('a'), key('b'), key('q')].into());
        let mut event_loop = EventLoop::new(script, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut ticks = 0;
        event_loop
            .run(|_, event| {
                let Some(event) = event else {
                    ticks += 1;
                    return Ok(ControlFlow::Continue);
                };
                seen.push(event.clone());
                Ok(if event == key('q') {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, vec![key('a'), key('b'), key('q')]);
        assert_eq!(ticks, 1);
    }

    #[test]
    fn poll_returns_none_when_idle() {
        let mut event_loop = EventLoop::new(Scripted(VecDeque::new()), Duration::from_millis(0));
        assert!(event_loop.poll().unwrap().is_none());
        event_loop.driver().0.push_back(key('x'));
        assert_eq!(event_loop.poll().unwrap(), Some(key('x')));
    }
}
