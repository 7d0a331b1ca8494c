#[macro_export]
macro_rules! define_data_enum {
    ($(#[$attr:meta])* $v:vis enum $name:ident for $data:ident { $($(#[$data_attr:meta])* $data_vis:vis $data_name:ident : $data_type:ty),* ; $($field:ident $arg:tt),* }) => {
        #[derive(Debug, Clone)]
        $v struct $data {
            $($(#[$data_attr])* $data_vis $data_name : $data_type),*
        }

        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, num_enum::TryFromPrimitive)]
        #[repr(i32)]
        $v enum $name {
            $($field),*
        }

        impl $data {
            const fn new_auto_data($($data_name : $data_type),*) -> $data {
                $data { $($data_name),* }
            }
        }

        impl $name {
            pub fn data(self) -> &'static $data {
                match self {
                    $(
                        $name::$field => {
                            const VAL: $data = $data::new_auto_data $arg;
                            &VAL
                        }
                    ),*
                }
            }
        }
    };
}
