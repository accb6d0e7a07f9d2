use super::*;

/// Arms a browser timer for a controller task. The controller decides at fire
/// time whether the task still stands; cancelled tasks are dropped silently.
pub(super) fn schedule_task(task: ScheduledTask) {
    DIAGNOSTICS.with(|state| state.borrow_mut().timers_started += 1);
    spawn_local(async move {
        sleep(Duration::from_millis(task.delay_ms)).await;
        let fired = with_controller(|controller| controller.fire(task.id)).flatten();
        if fired.is_some() {
            DIAGNOSTICS.with(|state| state.borrow_mut().timers_fired += 1);
            render();
        }
    });
}
