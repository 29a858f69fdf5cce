//! Standard Fortran intrinsic procedures
//!
//! Function references to these names are not recorded as call sites.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static INTRINSICS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Numeric
        "abs", "aimag", "aint", "anint", "ceiling", "cmplx", "conjg", "dble", "dim", "dprod",
        "floor", "int", "max", "min", "mod", "modulo", "nint", "real", "sign",
        // Mathematical
        "acos", "acosh", "asin", "asinh", "atan", "atan2", "atanh", "bessel_j0", "bessel_j1",
        "bessel_jn", "bessel_y0", "bessel_y1", "bessel_yn", "cos", "cosh", "erf", "erfc",
        "erfc_scaled", "exp", "gamma", "hypot", "log", "log10", "log_gamma", "norm2", "sin",
        "sinh", "sqrt", "tan", "tanh",
        // Character
        "achar", "adjustl", "adjustr", "char", "iachar", "ichar", "index", "len", "len_trim",
        "lge", "lgt", "lle", "llt", "new_line", "repeat", "scan", "trim", "verify",
        // Kind and inquiry
        "kind", "selected_char_kind", "selected_int_kind", "selected_real_kind", "bit_size",
        "digits", "epsilon", "huge", "maxexponent", "minexponent", "precision", "radix",
        "range", "tiny", "storage_size", "allocated", "associated", "present", "is_contiguous",
        "extends_type_of", "same_type_as",
        // Bit manipulation
        "btest", "iand", "ibclr", "ibits", "ibset", "ieor", "ior", "ishft", "ishftc", "not",
        "shifta", "shiftl", "shiftr", "popcnt", "poppar", "leadz", "trailz", "maskl", "maskr",
        "merge_bits", "dshiftl", "dshiftr",
        // Floating point manipulation
        "exponent", "fraction", "nearest", "rrspacing", "scale", "set_exponent", "spacing",
        // Arrays
        "all", "any", "count", "cshift", "dot_product", "eoshift", "findloc", "lbound",
        "matmul", "maxloc", "maxval", "merge", "minloc", "minval", "pack", "product", "reshape",
        "shape", "size", "spread", "sum", "transpose", "ubound", "unpack", "iall", "iany",
        "iparity", "parity", "logical", "transfer", "null",
        // Miscellaneous
        "command_argument_count", "image_index", "num_images", "this_image", "lcobound",
        "ucobound", "c_loc", "c_funloc", "c_associated", "c_sizeof", "ieee_is_nan",
        "ieee_is_finite", "ieee_value",
        // Intrinsic subroutines
        "cpu_time", "date_and_time", "get_command", "get_command_argument",
        "get_environment_variable", "move_alloc", "mvbits", "random_number", "random_seed",
        "system_clock", "execute_command_line", "c_f_pointer", "c_f_procpointer",
    ]
    .into_iter()
    .collect()
});

pub fn is_intrinsic(name: &str) -> bool {
    INTRINSICS.contains(name.to_ascii_lowercase().as_str())
}
