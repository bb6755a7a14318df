//! macros used by sitetheme

/// defer execution of code until current scope exits
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use sitetheme::defer;
///
/// let executed = RefCell::new(false);
///
/// {
///     defer! {
///         *executed.borrow_mut() = true;
///     }
///
///     assert!(!*executed.borrow());
/// }
///
/// assert!(*executed.borrow());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _defer_guard = $crate::utils::DeferGuard {
            func: Some(|| { $($body)* }),
        };
    };
}

/// make a theme preset
///
/// expects `ThemePreset`, `ThemeColors` and `ThemeVariant` to be in scope
#[macro_export]
macro_rules! impl_theme {
    ($name:ident, $display_name:expr, $variant:expr, $colors:expr) => {
        /// a theme preset
        #[derive(Clone, Default)]
        pub struct $name;

        impl ThemePreset for $name {
            fn colors() -> ThemeColors {
                $colors
            }

            fn name() -> &'static str {
                $display_name
            }

            fn variant() -> ThemeVariant {
                $variant
            }
        }
    };
}

/// helper macro for generating validators
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref value) = self.$field {
                        if !($requirement)(value) {
                            errors.push(format!("{}: {}", stringify!($field), $err_msg));
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// get the current value of a given setting
///
/// falls back to the built-in default when the loaded config leaves it unset
#[macro_export]
macro_rules! getopt {
    () => {
        $crate::config::instance::config()
    };

    ($lvl1:ident . $field:ident) => {{
        $crate::config::instance::get_or_default(
            |c| c.$lvl1.as_ref().and_then(|sub| sub.$field.clone()),
            $crate::config::options::SiteThemeCfg::default()
                .$lvl1
                .and_then(|sub| sub.$field)
                .unwrap_or_default(),
        )
    }};

    (raw $lvl1:ident . $field:ident) => {{
        $crate::config::instance::config()
            .ok()
            .and_then(|c| c.$lvl1.as_ref().and_then(|sub| sub.$field.clone()))
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    #[test]
    fn test_basic_defer() {
        let executed = RefCell::new(false);

        {
            defer! {
                *executed.borrow_mut() = true;
            }

            assert!(!*executed.borrow(), "defer should not have executed yet");
        }

        assert!(*executed.borrow(), "defer should've run by now");
    }

    #[test]
    fn test_multiple_defers_lifo_order() {
        let order = RefCell::new(Vec::new());

        {
            defer! {
                order.borrow_mut().push(1);
            }

            defer! {
                order.borrow_mut().push(2);
            }
        }

        assert_eq!(*order.borrow(), vec![2, 1]);
    }
}
