/// Runs blocking IO on its own OS thread and waits for it, so the HTTP client
/// never blocks inside the UI runtime.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    std::thread::scope(|scope| match scope.spawn(f).join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_closure_value() {
        let mut counter = 0;
        let value = run_blocking(|| {
            counter += 1;
            counter * 10
        });
        assert_eq!(value, 10);
        assert_eq!(counter, 1);
    }
}
