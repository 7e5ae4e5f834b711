//! Clock-edge interrupt gating

/// Gate for the interrupt that feeds the link receiver
///
/// While disabled, clock edges must not reach the receiver. Boards that mask
/// the real interrupt line implement this directly; boards that sample edges
/// elsewhere (PIO, timers) use a flag the receiver checks.
pub trait EdgeInterrupt {
    /// Let clock edges reach the receiver
    fn enable(&mut self);

    /// Stop clock edges from reaching the receiver
    fn disable(&mut self);
}

impl<T: EdgeInterrupt + ?Sized> EdgeInterrupt for &mut T {
    fn enable(&mut self) {
        (**self).enable();
    }

    fn disable(&mut self) {
        (**self).disable();
    }
}
