//! Cookie-backed cart persistence.
//!
//! The cart is stored as a percent-encoded JSON array of line items in a
//! single cookie. Every write re-issues the cookie with a fresh 30-day
//! lifetime, so the expiry slides forward with each mutation.
//!
//! When a signing secret is configured the cookie value is HMAC-signed, and
//! any cookie that fails verification reads as an empty cart.

use std::fmt;

use atelier_core::{Cart, CartLineItem};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponseParts, ResponseParts};
use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, CookieBuilder, CookieJar, Key, SameSite};

use super::{CartStore, CartStoreError};

/// Cart cookie name.
pub const CART_COOKIE_NAME: &str = "art-cart";

/// Cart cookie lifetime in days, renewed on every write.
pub const CART_COOKIE_MAX_AGE_DAYS: i64 = 30;

/// Minimum length of the signing secret, in bytes.
const MIN_SIGNING_SECRET_LEN: usize = 32;

/// Encodes carts into cookies and decodes them back.
#[derive(Clone)]
pub struct CookieCartCodec {
    secure: bool,
    key: Option<Key>,
}

impl fmt::Debug for CookieCartCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieCartCodec")
            .field("secure", &self.secure)
            .field("signed", &self.key.is_some())
            .finish()
    }
}

impl CookieCartCodec {
    /// Create an unsigned codec. `secure` sets the cookie's `Secure` flag.
    #[must_use]
    pub const fn new(secure: bool) -> Self {
        Self { secure, key: None }
    }

    /// Sign cart cookies with a key derived from `secret`.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError::SigningSecretTooShort` if `secret` is shorter
    /// than 32 bytes.
    pub fn with_signing_secret(mut self, secret: &[u8]) -> Result<Self, CartStoreError> {
        if secret.len() < MIN_SIGNING_SECRET_LEN {
            return Err(CartStoreError::SigningSecretTooShort(secret.len()));
        }
        self.key = Some(Key::derive_from(secret));
        Ok(self)
    }

    /// Open a request-scoped store holding the cart carried by `headers`.
    #[must_use]
    pub fn store(&self, headers: &HeaderMap) -> CookieCartStore {
        CookieCartStore {
            cart: self.decode(headers),
            codec: self.clone(),
            pending: None,
        }
    }

    /// Read the cart from a request's `Cookie` headers.
    ///
    /// A missing cookie, a bad signature, or an unparseable payload all read
    /// as an empty cart.
    #[must_use]
    pub fn decode(&self, headers: &HeaderMap) -> Cart {
        self.read_cookie(headers)
            .map_or_else(Cart::new, |cookie| self.decode_value(cookie.value()))
    }

    /// Parse a cookie payload (JSON text) into a cart.
    #[must_use]
    pub fn decode_value(&self, value: &str) -> Cart {
        match serde_json::from_str::<Vec<CartLineItem>>(value) {
            Ok(items) => Cart::from_stored(items).unwrap_or_else(|| {
                tracing::warn!("Cart cookie holds an invalid cart state, treating as empty");
                Cart::new()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse cart cookie, treating as empty");
                Cart::new()
            }
        }
    }

    /// Build the cookie that stores `cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized.
    pub fn encode(&self, cart: &Cart) -> Result<Cookie<'static>, CartStoreError> {
        let value = serde_json::to_string(cart.items())?;
        let lifetime = Duration::days(CART_COOKIE_MAX_AGE_DAYS);
        let cookie = self
            .builder(value)
            .max_age(lifetime)
            .expires(OffsetDateTime::now_utc() + lifetime)
            .build();
        Ok(self.sign(cookie))
    }

    /// Build the cookie that deletes the cart.
    #[must_use]
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.builder(String::new()).build();
        cookie.make_removal();
        cookie
    }

    fn builder(&self, value: String) -> CookieBuilder<'static> {
        Cookie::build((CART_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }

    fn sign(&self, cookie: Cookie<'static>) -> Cookie<'static> {
        let Some(key) = &self.key else {
            return cookie;
        };
        let mut jar = CookieJar::new();
        jar.signed_mut(key).add(cookie.clone());
        jar.get(CART_COOKIE_NAME).cloned().unwrap_or(cookie)
    }

    fn read_cookie(&self, headers: &HeaderMap) -> Option<Cookie<'static>> {
        let mut jar = CookieJar::new();
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Cookie::split_parse_encoded(value.to_owned()))
            .filter_map(Result::ok)
            .filter(|cookie| cookie.name() == CART_COOKIE_NAME)
            .for_each(|cookie| jar.add_original(cookie));

        match &self.key {
            Some(key) => {
                let verified = jar.signed(key).get(CART_COOKIE_NAME);
                if verified.is_none() && jar.get(CART_COOKIE_NAME).is_some() {
                    tracing::warn!("Cart cookie failed signature verification, treating as empty");
                }
                verified
            }
            None => jar.get(CART_COOKIE_NAME).cloned(),
        }
    }
}

/// A cart loaded from the request cookie, plus the cookie to send back.
#[derive(Debug)]
pub struct CookieCartStore {
    codec: CookieCartCodec,
    cart: Cart,
    pending: Option<Cookie<'static>>,
}

impl CookieCartStore {
    /// The `Set-Cookie` value to send, if the cart was saved or cleared.
    #[must_use]
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        let cookie = self.pending.as_ref()?;
        HeaderValue::from_str(&cookie.encoded().to_string()).ok()
    }
}

impl CartStore for CookieCartStore {
    fn load(&self) -> Cart {
        self.cart.clone()
    }

    fn save(&mut self, cart: &Cart) -> Result<(), CartStoreError> {
        self.pending = Some(self.codec.encode(cart)?);
        self.cart = cart.clone();
        Ok(())
    }

    fn clear(&mut self) {
        self.pending = Some(self.codec.removal());
        self.cart = Cart::new();
    }
}

impl IntoResponseParts for CookieCartStore {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.set_cookie() {
            res.headers_mut().append(header::SET_COOKIE, value);
        }
        Ok(res)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use atelier_core::ArtworkId;

    const SECRET: &[u8] = b"k7Qz!9vR#2mW$5xT^8pL&1nB*4cY@6hJ";

    fn sample_cart() -> Cart {
        let catalog = Catalog::fixture();
        let mut cart = Cart::new();
        cart.add(catalog.get(&ArtworkId::new("1")).unwrap());
        cart.add(catalog.get(&ArtworkId::new("1")).unwrap());
        cart.add(catalog.get(&ArtworkId::new("3")).unwrap());
        cart
    }

    fn request_with(cookie: &Cookie<'_>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; {}", cookie.stripped().encoded());
        headers.insert(header::COOKIE, HeaderValue::from_str(&value).unwrap());
        headers
    }

    fn raw_request(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_written_cookie_reads_back() {
        let codec = CookieCartCodec::new(false);
        let cart = sample_cart();
        let cookie = codec.encode(&cart).unwrap();
        assert_eq!(codec.decode(&request_with(&cookie)), cart);
    }

    #[test]
    fn test_cookie_attributes() {
        let codec = CookieCartCodec::new(false);
        let cookie = codec.encode(&sample_cart()).unwrap();

        assert_eq!(cookie.name(), CART_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));

        let expires = cookie.expires_datetime().unwrap();
        let remaining = expires - OffsetDateTime::now_utc();
        assert!(remaining > Duration::days(29));
        assert!(remaining <= Duration::days(30));
    }

    #[test]
    fn test_secure_flag_follows_codec() {
        let codec = CookieCartCodec::new(true);
        assert_eq!(codec.encode(&Cart::new()).unwrap().secure(), Some(true));
        assert_eq!(codec.removal().secure(), Some(true));
    }

    #[test]
    fn test_missing_cookie_is_empty_cart() {
        let codec = CookieCartCodec::new(false);
        assert!(codec.decode(&HeaderMap::new()).is_empty());
        assert!(codec.decode(&raw_request("theme=dark")).is_empty());
    }

    #[test]
    fn test_corrupt_cookie_is_empty_cart() {
        let codec = CookieCartCodec::new(false);
        assert!(codec.decode(&raw_request("art-cart=%5B%7B%22id")).is_empty());
        assert!(codec.decode(&raw_request("art-cart=not-json")).is_empty());
        assert!(codec.decode_value("{\"id\":\"1\"}").is_empty());
    }

    #[test]
    fn test_invalid_stored_state_is_empty_cart() {
        let codec = CookieCartCodec::new(false);
        let mut items = sample_cart().into_items();
        items[0].quantity = 0;
        let value = serde_json::to_string(&items).unwrap();
        assert!(codec.decode_value(&value).is_empty());
    }

    #[test]
    fn test_signed_cookie_reads_back() {
        let codec = CookieCartCodec::new(false)
            .with_signing_secret(SECRET)
            .unwrap();
        let cart = sample_cart();
        let cookie = codec.encode(&cart).unwrap();

        assert_ne!(cookie.value(), serde_json::to_string(cart.items()).unwrap());
        assert_eq!(codec.decode(&request_with(&cookie)), cart);
    }

    #[test]
    fn test_signed_codec_rejects_unsigned_and_tampered_cookies() {
        let signed = CookieCartCodec::new(false)
            .with_signing_secret(SECRET)
            .unwrap();
        let unsigned = CookieCartCodec::new(false);

        let plain = unsigned.encode(&sample_cart()).unwrap();
        assert!(signed.decode(&request_with(&plain)).is_empty());

        let mut forged = signed.encode(&sample_cart()).unwrap();
        let tampered = forged.value().replace("850", "1");
        forged.set_value(tampered);
        assert!(signed.decode(&request_with(&forged)).is_empty());
    }

    #[test]
    fn test_short_signing_secret_is_rejected() {
        let result = CookieCartCodec::new(false).with_signing_secret(b"short");
        assert!(matches!(result, Err(CartStoreError::SigningSecretTooShort(5))));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let removal = CookieCartCodec::new(false).removal();
        assert_eq!(removal.name(), CART_COOKIE_NAME);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
        assert_eq!(removal.path(), Some("/"));
    }

    #[test]
    fn test_store_emits_cookie_only_after_write() {
        let codec = CookieCartCodec::new(false);
        let mut store = codec.store(&HeaderMap::new());
        assert!(store.set_cookie().is_none());

        store.save(&sample_cart()).unwrap();
        let header = store.set_cookie().unwrap();
        let header = header.to_str().unwrap();
        assert!(header.starts_with("art-cart="));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Max-Age=2592000"));
        assert_eq!(store.load(), sample_cart());

        store.clear();
        assert!(store.load().is_empty());
        assert!(store.set_cookie().unwrap().to_str().unwrap().contains("Max-Age=0"));
    }
}
