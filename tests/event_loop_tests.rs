use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::{Duration, Instant},
};

use underbar::decorators::{Throttle, delay};
use underbar::runtime::{function::Function, toolkit::Toolkit, value::Value};
use underbar::scheduler::{EventLoop, Scheduler};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn delayed_calls_run_in_deadline_order() {
    init_logging();
    let event_loop = EventLoop::new().unwrap();
    let order = Rc::new(RefCell::new(Vec::new()));
    let record = {
        let order = Rc::clone(&order);
        Function::new("record", move |_, args| {
            order.borrow_mut().push(args[0].clone());
            Ok(Value::Undefined)
        })
    };

    let started = Instant::now();
    delay(&event_loop, record.clone(), Duration::from_millis(20), vec![Value::from("late")]);
    delay(&event_loop, record, Duration::from_millis(5), vec![Value::from("early")]);

    assert_eq!(event_loop.run_until_idle().unwrap(), 2);
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert_eq!(*order.borrow(), vec![Value::from("early"), Value::from("late")]);
}

#[test]
fn cancelled_call_is_skipped() {
    init_logging();
    let event_loop = EventLoop::new().unwrap();
    let calls = Rc::new(Cell::new(0));
    let tick = {
        let calls = Rc::clone(&calls);
        Function::new("tick", move |_, _| {
            calls.set(calls.get() + 1);
            Ok(Value::Undefined)
        })
    };

    let id = delay(&event_loop, tick, Duration::from_millis(5), vec![]);
    assert!(event_loop.cancel(id));
    assert_eq!(event_loop.run_until_idle().unwrap(), 0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn throttle_emits_trailing_call_on_wall_clock() {
    init_logging();
    let event_loop = Rc::new(EventLoop::new().unwrap());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = {
        let seen = Rc::clone(&seen);
        Function::new("record", move |_, args| {
            seen.borrow_mut().push(args[0].clone());
            Ok(args[0].clone())
        })
    };
    let throttled = Throttle::new(event_loop.clone(), record, Duration::from_millis(30));

    for n in 0..5 {
        throttled.call(&Value::Undefined, &[Value::Integer(n)]).unwrap();
    }
    assert_eq!(*seen.borrow(), vec![Value::Integer(0)]);

    event_loop.run_until_idle().unwrap();
    assert_eq!(*seen.borrow(), vec![Value::Integer(0), Value::Integer(4)]);
    assert_eq!(throttled.last_result(), Value::Integer(4));
}

#[test]
fn toolkit_runs_on_an_event_loop() {
    init_logging();
    let event_loop = Rc::new(EventLoop::new().unwrap());
    let toolkit = Toolkit::new(event_loop.clone());
    let calls = Rc::new(Cell::new(0));
    let tick = {
        let calls = Rc::clone(&calls);
        Value::Function(Function::new("tick", move |_, _| {
            calls.set(calls.get() + 1);
            Ok(Value::Undefined)
        }))
    };

    toolkit.call("delay", vec![tick, Value::Integer(1)]).unwrap();
    assert_eq!(event_loop.pending(), 1);
    event_loop.run_until_idle().unwrap();
    assert_eq!(calls.get(), 1);
}
