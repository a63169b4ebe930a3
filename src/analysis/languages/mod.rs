//! Language-family scanner implementations.

mod c_family;
mod python;

pub use c_family::CFamilyScanner;
pub use python::PythonScanner;

use super::{Language, LanguageFamily, ScopeScanner};
use once_cell::sync::OnceCell;

/// Static storage for the indentation scanner.
static PYTHON_SCANNER: OnceCell<PythonScanner> = OnceCell::new();

/// Static storage for the brace scanner.
static C_FAMILY_SCANNER: OnceCell<CFamilyScanner> = OnceCell::new();

/// Get the scanner for a block-delimiting family.
pub fn scanner_for_family(family: LanguageFamily) -> &'static dyn ScopeScanner {
    match family {
        LanguageFamily::Indentation => {
            PYTHON_SCANNER.get_or_init(PythonScanner::new) as &'static dyn ScopeScanner
        }
        LanguageFamily::Brace => {
            C_FAMILY_SCANNER.get_or_init(CFamilyScanner::new) as &'static dyn ScopeScanner
        }
    }
}

/// Get the scanner for a language.
///
/// `Unknown` is served by the brace scanner.
pub fn scanner_for(language: Language) -> &'static dyn ScopeScanner {
    scanner_for_family(language.family())
}
