//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        admin::MockAdminService,
        catalog::{
            MockCatalogService,
            records::{ProductRecord, ProductUuid},
        },
        contacts::{
            MockContactsService,
            records::{ContactRecord, ContactStatus, ContactUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
        },
        users::{
            MockAccountsService,
            records::{Address, UserRecord, UserRole, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub accounts: MockAccountsService,
    pub catalog: MockCatalogService,
    pub orders: MockOrdersService,
    pub contacts: MockContactsService,
    pub admin: MockAdminService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            accounts: Arc::new(self.accounts),
            catalog: Arc::new(self.catalog),
            orders: Arc::new(self.orders),
            contacts: Arc::new(self.contacts),
            admin: Arc::new(self.admin),
        })
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: UserRole) -> UserRecord {
    UserRecord {
        uuid,
        email: format!("{uuid}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Weaver".to_string(),
        role,
        is_active: true,
        address: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_address() -> Address {
    Address {
        street: "1 Loom Lane".to_string(),
        city: "Bath".to_string(),
        state: "Somerset".to_string(),
        postal_code: "BA1 1AA".to_string(),
        country: "UK".to_string(),
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Spiral Plant Hanger".to_string(),
        description: "Elegant spiral design".to_string(),
        price: Decimal::new(4550, 2),
        category: "Plant Hangers".to_string(),
        image: "/images/IMG_3131.JPG".to_string(),
        images: Vec::new(),
        in_stock: true,
        stock_quantity: 8,
        featured: true,
        metadata: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: user,
        items: vec![OrderItemRecord {
            product_uuid: ProductUuid::from_uuid(Uuid::from_u128(10)),
            name: "Spiral Plant Hanger".to_string(),
            price: Decimal::new(4550, 2),
            quantity: 2,
            subtotal: Decimal::new(9100, 2),
        }],
        total_amount: Decimal::new(9100, 2),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        shipping_address: make_address(),
        notes: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_contact(uuid: ContactUuid) -> ContactRecord {
    ContactRecord {
        uuid,
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        subject: "Custom order".to_string(),
        message: "Do you take commissions?".to_string(),
        status: ContactStatus::New,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(make_user(TEST_CUSTOMER_UUID, UserRole::Customer));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(make_user(TEST_ADMIN_UUID, UserRole::Admin));
    ctrl.call_next(req, depot, res).await;
}

/// A service with no signed-in user.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service where every request is made by an active customer.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// A service where every request is made by an active admin.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}
