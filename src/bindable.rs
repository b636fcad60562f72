use crate::error::GlError;

/// Implemented by resources that can be made "current" in the host context.
///
/// Which resource is currently bound is ambient state of the host context, not of the wrapper:
/// binding one buffer to the array buffer target implicitly unbinds whatever was bound there
/// before.
pub trait Bindable {
    /// Makes this resource current. Fails when the resource has already been disposed.
    fn bind(&self) -> Result<(), GlError>;

    /// Reverts the binding made by [bind].
    fn unbind(&self);
}

/// Binds every resource in `bindables` in order, runs `f`, and then unbinds the resources in
/// reverse order.
///
/// The resources are unbound regardless of how `f` exits, including when it unwinds. The result of
/// `f` is returned unchanged. When one of the binds fails, the resources that were already bound
/// are unbound (again in reverse order), `f` is not run and the bind error is returned.
pub fn using_bindables<F, T, E>(bindables: &[&dyn Bindable], f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<GlError>,
{
    let mut guard = UnbindOnExit {
        bindables,
        bound: 0,
    };

    for bindable in bindables {
        bindable.bind()?;

        guard.bound += 1;
    }

    f()
}

struct UnbindOnExit<'a, 'b> {
    bindables: &'a [&'b dyn Bindable],
    bound: usize,
}

impl Drop for UnbindOnExit<'_, '_> {
    fn drop(&mut self) {
        for bindable in self.bindables[..self.bound].iter().rev() {
            bindable.unbind();
        }
    }
}
