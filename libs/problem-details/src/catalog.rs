//! Catalog of well-known problem types shared with backend services.
//!
//! Type URIs follow the `<base>/problems/<slug>` convention. Nothing here
//! enforces it: a server that emits other URIs still produces valid
//! [`ProblemDetail`]s, they just won't match [`ProblemDef::matches`].

use crate::accessors::is_problem_type;
use crate::problem::ProblemDetail;

/// Base URI under which the backend publishes its problem types.
pub const DEFAULT_PROBLEM_BASE_URI: &str = "https://api.shopeazy.com/problems";

/// Static problem type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: u16,
    pub title: &'static str,
    pub slug: &'static str,
}

impl ProblemDef {
    /// Full type URI for this definition under `base`.
    #[must_use]
    pub fn type_uri(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.slug)
    }

    /// Convert this definition into a record with the given detail.
    #[inline]
    pub fn as_problem(&self, base: &str, detail: impl Into<String>) -> ProblemDetail {
        ProblemDetail::new()
            .with_type(self.type_uri(base))
            .with_title(self.title)
            .with_status(self.status)
            .with_detail(detail)
    }

    /// Whether `problem` carries this definition's type, under any base URI.
    #[must_use]
    pub fn matches(&self, problem: &ProblemDetail) -> bool {
        is_problem_type(problem, self.slug)
    }
}

// Produced on the client side by the normalizer.
pub const UNKNOWN_ERROR: ProblemDef = ProblemDef {
    status: 500,
    title: "Unknown Error",
    slug: "unknown-error",
};
pub const NETWORK_ERROR: ProblemDef = ProblemDef {
    status: 0,
    title: "Network Error",
    slug: "network-error",
};

// 4xx
pub const BAD_REQUEST: ProblemDef = ProblemDef {
    status: 400,
    title: "Bad Request",
    slug: "bad-request",
};
pub const VALIDATION_ERROR: ProblemDef = ProblemDef {
    status: 400,
    title: "Validation Failed",
    slug: "validation-error",
};
pub const CONSTRAINT_VIOLATION: ProblemDef = ProblemDef {
    status: 400,
    title: "Constraint Violation",
    slug: "constraint-violation",
};
pub const UNAUTHORIZED: ProblemDef = ProblemDef {
    status: 401,
    title: "Unauthorized",
    slug: "unauthorized",
};
pub const FORBIDDEN: ProblemDef = ProblemDef {
    status: 403,
    title: "Forbidden",
    slug: "forbidden",
};
pub const NOT_FOUND: ProblemDef = ProblemDef {
    status: 404,
    title: "Resource Not Found",
    slug: "not-found",
};
pub const CONFLICT: ProblemDef = ProblemDef {
    status: 409,
    title: "Conflict",
    slug: "conflict",
};

// Domain-specific 4xx
pub const INVALID_EMAIL: ProblemDef = ProblemDef {
    status: 400,
    title: "Invalid Email",
    slug: "invalid-email",
};
pub const DUPLICATE_PRODUCT: ProblemDef = ProblemDef {
    status: 400,
    title: "Duplicate Product",
    slug: "duplicate-product",
};
pub const PRODUCT_OUT_OF_STOCK: ProblemDef = ProblemDef {
    status: 404,
    title: "Product Out of Stock",
    slug: "product-out-of-stock",
};
pub const PRODUCT_NOT_IN_CART: ProblemDef = ProblemDef {
    status: 404,
    title: "Product Not in Cart",
    slug: "product-not-in-cart",
};
pub const SELLER_ALREADY_EXISTS: ProblemDef = ProblemDef {
    status: 409,
    title: "Seller Already Exists",
    slug: "seller-already-exists",
};
pub const COMPANY_NAME_TAKEN: ProblemDef = ProblemDef {
    status: 400,
    title: "Company Name Taken",
    slug: "company-name-taken",
};
pub const FORBIDDEN_OPERATION: ProblemDef = ProblemDef {
    status: 403,
    title: "Forbidden Operation",
    slug: "forbidden-operation",
};
pub const INVALID_QUANTITY: ProblemDef = ProblemDef {
    status: 400,
    title: "Invalid Quantity",
    slug: "invalid-quantity",
};
pub const UNAUTHENTICATED_ACCESS: ProblemDef = ProblemDef {
    status: 401,
    title: "Unauthenticated Access",
    slug: "unauthenticated-access",
};
pub const INVALID_REQUEST_DATA: ProblemDef = ProblemDef {
    status: 400,
    title: "Invalid Request Data",
    slug: "invalid-request-data",
};

// 5xx
pub const INTERNAL_ERROR: ProblemDef = ProblemDef {
    status: 500,
    title: "Internal Server Error",
    slug: "internal-server-error",
};
pub const SERVICE_UNAVAILABLE: ProblemDef = ProblemDef {
    status: 503,
    title: "Service Unavailable",
    slug: "service-unavailable",
};

/// Every definition in the catalog.
pub const ALL: &[ProblemDef] = &[
    UNKNOWN_ERROR,
    NETWORK_ERROR,
    BAD_REQUEST,
    VALIDATION_ERROR,
    CONSTRAINT_VIOLATION,
    UNAUTHORIZED,
    FORBIDDEN,
    NOT_FOUND,
    CONFLICT,
    INVALID_EMAIL,
    DUPLICATE_PRODUCT,
    PRODUCT_OUT_OF_STOCK,
    PRODUCT_NOT_IN_CART,
    SELLER_ALREADY_EXISTS,
    COMPANY_NAME_TAKEN,
    FORBIDDEN_OPERATION,
    INVALID_QUANTITY,
    UNAUTHENTICATED_ACCESS,
    INVALID_REQUEST_DATA,
    INTERNAL_ERROR,
    SERVICE_UNAVAILABLE,
];

/// Look up a definition by slug.
#[must_use]
pub fn by_slug(slug: &str) -> Option<&'static ProblemDef> {
    ALL.iter().find(|def| def.slug == slug)
}
