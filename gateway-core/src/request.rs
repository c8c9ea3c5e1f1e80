//! Generic payload construction shared by every operation.

use gateway_types::{GatewayError, Order, PaymentRequest, Transaction, UrlResolver};

/// Host action route the buyer returns to after an offsite flow.
pub const COMPLETE_PAYMENT_ROUTE: &str = "payments/complete-payment";
/// Host action route for an abandoned offsite flow.
pub const CANCEL_PAYMENT_ROUTE: &str = "payments/cancel-payment";
/// Host action route providers post webhook notifications to.
pub const NOTIFY_ROUTE: &str = "payments/notify";

/// Builds the payload fields every operation shares.
///
/// `transactionReference` starts as the transaction hash; capture and
/// refund overwrite it on the call object with the prior provider
/// reference. Return and cancel URLs are always present so providers
/// can pick what they need; the notify URL only exists for providers
/// that support webhooks.
pub(crate) fn base_request(
    transaction: &Transaction,
    webhooks: bool,
    urls: &dyn UrlResolver,
) -> Result<PaymentRequest, GatewayError> {
    let transaction_id = transaction.id.to_string();
    let params: &[(&str, &str)] = &[("transaction", &transaction_id), ("hash", &transaction.hash)];

    let mut request = PaymentRequest::new(transaction.amount, transaction.currency, transaction.id);
    request.description = Some(format!("Order #{}", transaction.order_id));
    request.transaction_reference = Some(transaction.hash.clone());
    request.return_url = Some(urls.action_url(COMPLETE_PAYMENT_ROUTE, params)?);
    request.cancel_url = Some(urls.action_url(CANCEL_PAYMENT_ROUTE, params)?);
    if webhooks {
        request.notify_url = Some(urls.action_url(NOTIFY_ROUTE, params)?);
    }
    Ok(request)
}

/// Copies the order-derived fields onto a payload.
pub(crate) fn populate_order_fields(request: &mut PaymentRequest, order: &Order) {
    request.order = Some(order.number.clone());
    request.order_id = Some(order.id);
    request.receipt_email = order.email.clone();
}

/// Maps the IPv6 loopback to its IPv4 spelling.
///
/// Local development submits from `::1`, which several providers
/// reject as a client IP. Everything else passes through untouched.
pub(crate) fn normalize_client_ip(ip: String) -> String {
    if ip == "::1" {
        "127.0.0.1".to_string()
    } else {
        ip
    }
}
